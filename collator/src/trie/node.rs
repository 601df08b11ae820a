use std::collections::BTreeMap;

use crate::collation_element::TableValue;
use crate::error::TableError;

/// узел бора сокращений
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContractionNode
{
    /// значение, если последовательность заканчивается на этом узле
    value: Option<u32>,
    /// потомки: диапазон в массиве переходов
    edges_start: u32,
    edges_len: u32,
}

/// переход к потомку по кодпоинту
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge
{
    code: u32,
    node: u32,
}

/// бор сокращений: корень каждого сокращения - стартер, значение в основном боре которого
/// ссылается на номер корневого узла
#[derive(Debug, Clone, Default)]
pub struct Contractions
{
    nodes: Vec<ContractionNode>,
    /// переходы, отсортированные по кодпоинту в пределах узла
    edges: Vec<Edge>,
}

impl Contractions
{
    /// потомок узла по кодпоинту
    #[inline]
    pub fn child(&self, node: u32, code: u32) -> Option<u32>
    {
        let edges = self.edges_of(node);

        edges
            .binary_search_by_key(&code, |edge| edge.code)
            .ok()
            .map(|index| edges[index].node)
    }

    /// значение узла, если последовательность может на нем закончиться
    #[inline]
    pub fn value(&self, node: u32) -> Option<TableValue>
    {
        self.nodes
            .get(node as usize)
            .and_then(|node| node.value)
            .map(TableValue::from_raw)
    }

    #[inline]
    pub fn has_children(&self, node: u32) -> bool
    {
        !self.edges_of(node).is_empty()
    }

    /// все кодпоинты, которые продолжают какое-либо сокращение
    pub fn continuations(&self) -> impl Iterator<Item = u32> + '_
    {
        self.edges.iter().map(|edge| edge.code)
    }

    pub fn len(&self) -> usize
    {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.nodes.is_empty()
    }

    #[inline]
    fn edges_of(&self, node: u32) -> &[Edge]
    {
        match self.nodes.get(node as usize) {
            Some(node) => {
                let start = node.edges_start as usize;

                &self.edges[start .. start + node.edges_len as usize]
            }
            None => &[],
        }
    }
}

/// промежуточное представление бора сокращений
#[derive(Debug, Default)]
struct PendingNode
{
    value: Option<u32>,
    children: BTreeMap<u32, PendingNode>,
}

/// сборка бора сокращений
#[derive(Debug, Default)]
pub struct ContractionsBuilder
{
    roots: BTreeMap<u32, PendingNode>,
}

impl ContractionsBuilder
{
    /// добавить последовательность; значение - упакованное значение бора (CE или расширение)
    pub fn insert(&mut self, codes: &[u32], value: u32) -> Result<(), TableError>
    {
        let (&first, rest) = codes.split_first().ok_or(TableError::ShortContraction)?;

        if rest.is_empty() {
            return Err(TableError::ShortContraction);
        }

        let mut node = self.roots.entry(first).or_default();

        for &code in rest {
            node = node.children.entry(code).or_default();
        }

        node.value = Some(value);

        Ok(())
    }

    /// есть ли сокращения, начинающиеся с кодпоинта
    pub fn is_starter(&self, code: u32) -> bool
    {
        self.roots.contains_key(&code)
    }

    /// стартеры сокращений
    pub fn starters(&self) -> impl Iterator<Item = u32> + '_
    {
        self.roots.keys().copied()
    }

    /// построить бор; starter_value - значение одиночного стартера (для корня).
    /// результат - бор и номера корневых узлов для стартеров
    pub fn build<F>(self, mut starter_value: F) -> Result<(Contractions, BTreeMap<u32, u32>), TableError>
    where
        F: FnMut(u32) -> u32,
    {
        let mut contractions = Contractions::default();
        let mut roots = BTreeMap::new();

        for (code, mut root) in self.roots {
            root.value = Some(starter_value(code));
            roots.insert(code, flatten(&mut contractions, root)?);
        }

        Ok((contractions, roots))
    }
}

/// записать узел и его потомков (в ширину по уровню: переходы узла идут подряд)
fn flatten(contractions: &mut Contractions, node: PendingNode) -> Result<u32, TableError>
{
    let index = contractions.nodes.len();

    if index > crate::collation_element::MAX_PAYLOAD_OFFSET {
        return Err(TableError::Overflow("contraction nodes"));
    }

    contractions.nodes.push(ContractionNode {
        value: node.value,
        edges_start: 0,
        edges_len: 0,
    });

    let mut edges = Vec::with_capacity(node.children.len());

    for (code, child) in node.children {
        let child_index = flatten(contractions, child)?;
        edges.push(Edge {
            code,
            node: child_index,
        });
    }

    let start = contractions.edges.len() as u32;
    let len = edges.len() as u32;

    contractions.edges.extend(edges);
    contractions.nodes[index].edges_start = start;
    contractions.nodes[index].edges_len = len;

    Ok(index as u32)
}
