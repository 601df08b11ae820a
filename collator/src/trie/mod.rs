use std::collections::{BTreeMap, HashMap};

use crate::collation_element::TableValue;
use crate::error::TableError;

mod node;

pub use node::{Contractions, ContractionsBuilder};

/// количество кодпоинтов в блоке
const BLOCK_SIZE: usize = 128;
const BLOCK_BITS: u32 = 7;
/// количество блоков BMP
const BMP_BLOCKS: usize = 0x10000 / BLOCK_SIZE;
/// блоков на один ведущий суррогат (1024 завершающих суррогата)
const BLOCKS_PER_LEAD: usize = 0x400 / BLOCK_SIZE;

/// бор кодпоинтов: значение для каждого кодпоинта Unicode
///
/// BMP индексируется напрямую по блокам; значения дополнительных плоскостей находятся через
/// значение ведущего суррогата, которое хранит смещение группы блоков для завершающего суррогата
#[derive(Debug, Clone)]
pub struct CodepointTrie
{
    /// индексы блоков: 512 для BMP, затем по 8 на каждый ведущий суррогат с данными
    index: Vec<u16>,
    /// блоки значений; блок 0 - значения по умолчанию
    data: Vec<u32>,
    /// значение по умолчанию
    default: u32,
}

impl CodepointTrie
{
    /// значение для кодпоинта
    #[inline(always)]
    pub fn get(&self, code: u32) -> u32
    {
        if code < 0x10000 {
            return self.get_bmp(code);
        }

        if code > 0x10FFFF {
            return self.default;
        }

        let lead = 0xD7C0 + (code >> 10);

        match TableValue::from_raw(self.get_bmp(lead)) {
            TableValue::LeadSurrogate(offset) => self.get_with_lead(offset, code & 0x3FF),
            _ => self.default,
        }
    }

    /// значение для завершающего суррогата по смещению, полученному от ведущего
    #[inline(always)]
    pub fn get_with_lead(&self, offset: u32, trail: u32) -> u32
    {
        let block = self.index[offset as usize + (trail >> BLOCK_BITS) as usize] as usize;

        self.data[(block << BLOCK_BITS) | (trail as usize & (BLOCK_SIZE - 1))]
    }

    #[inline(always)]
    fn get_bmp(&self, code: u32) -> u32
    {
        let block = self.index[(code >> BLOCK_BITS) as usize] as usize;

        self.data[(block << BLOCK_BITS) | (code as usize & (BLOCK_SIZE - 1))]
    }

    /// размер данных в u32
    pub fn data_len(&self) -> usize
    {
        self.data.len()
    }

    /// построить бор по значениям; кодпоинты без значения получают default
    pub fn build(values: &BTreeMap<u32, u32>, default: u32) -> Result<Self, TableError>
    {
        let mut builder = BlocksBuilder::new(default);

        // сначала - дополнительные плоскости: ведущие суррогаты получают значения-ссылки
        let mut bmp: BTreeMap<u32, u32> = values.range(.. 0x10000).map(|(&k, &v)| (k, v)).collect();
        let mut supplementary: BTreeMap<u32, Vec<(u32, u32)>> = BTreeMap::new();

        for (&code, &value) in values.range(0x10000 ..= 0x10FFFF) {
            supplementary
                .entry(0xD7C0 + (code >> 10))
                .or_default()
                .push((code & 0x3FF, value));
        }

        let mut index: Vec<u16> = vec![0; BMP_BLOCKS];

        for (lead, trails) in supplementary {
            let offset = index.len();

            if offset > 0x00FF_FFFF {
                return Err(TableError::Overflow("trie index"));
            }

            for block in 0 .. BLOCKS_PER_LEAD {
                let start = (block * BLOCK_SIZE) as u32;
                let entries = trails
                    .iter()
                    .filter(|(trail, _)| (start .. start + BLOCK_SIZE as u32).contains(trail))
                    .map(|&(trail, value)| (trail - start, value));

                index.push(builder.block(entries)?);
            }

            bmp.insert(lead, TableValue::LeadSurrogate(offset as u32).to_raw());
        }

        for block in 0 .. BMP_BLOCKS {
            let start = (block * BLOCK_SIZE) as u32;
            let entries = bmp
                .range(start .. start + BLOCK_SIZE as u32)
                .map(|(&code, &value)| (code - start, value));

            index[block] = builder.block(entries)?;
        }

        Ok(Self {
            index,
            data: builder.data,
            default,
        })
    }
}

/// сборка блоков с объединением одинаковых
struct BlocksBuilder
{
    data: Vec<u32>,
    known: HashMap<Vec<u32>, u16>,
    default: u32,
}

impl BlocksBuilder
{
    fn new(default: u32) -> Self
    {
        let empty = vec![default; BLOCK_SIZE];
        let mut known = HashMap::new();
        known.insert(empty.clone(), 0);

        Self {
            data: empty,
            known,
            default,
        }
    }

    /// номер блока с указанными значениями (смещение в блоке, значение)
    fn block(&mut self, entries: impl Iterator<Item = (u32, u32)>) -> Result<u16, TableError>
    {
        let mut block = vec![self.default; BLOCK_SIZE];

        for (offset, value) in entries {
            block[offset as usize] = value;
        }

        if let Some(&number) = self.known.get(&block) {
            return Ok(number);
        }

        let number = u16::try_from(self.data.len() / BLOCK_SIZE)
            .map_err(|_| TableError::Overflow("trie blocks"))?;

        self.data.extend_from_slice(&block);
        self.known.insert(block, number);

        Ok(number)
    }
}
