// сборка таблицы весов: проверка элементов, каноническое замыкание, небезопасные кодпоинты,
// таблица быстрого пути, бор

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::codepoint::{ccc, decomposition, fcd_values};
use crate::collation_element::{Case, Ce, TableValue, MAX_EXPANSION_LEN, MAX_PAYLOAD_OFFSET};
use crate::compare::fast::FastLatin;
use crate::error::TableError;
use crate::hangul::{HANGUL_S_BASE, HANGUL_S_COUNT};
use crate::implicit::implicit_elements;
use crate::options::Settings;
use crate::trie::{CodepointTrie, ContractionsBuilder};
use crate::weights::{KeyConstants, COMMON_WEIGHT, MERGE_SEPARATOR_WEIGHT};

use super::{Group, UnitSet, WeightTable, MERGE_SEPARATOR_LEAD, MERGE_SEPARATOR_PRIMARY};

/// CE разделителя слияния (U+FFFE)
pub const MERGE_SEPARATOR_CE: Ce = Ce::new(
    MERGE_SEPARATOR_PRIMARY,
    MERGE_SEPARATOR_WEIGHT,
    Case::Lower,
    MERGE_SEPARATOR_WEIGHT,
);

/// старшие байты от этого значения зарезервированы за вычисляемыми весами
const FIRST_IMPLICIT_LEAD: u8 = 0xF0;
/// диапазоны кодпоинтов, для которых строится каноническое замыкание
const CLOSURE_RANGES: [RangeInclusive<u32>; 2] = [0xC0 ..= 0x1FFFF, 0x2F800 ..= 0x2FA1F];
/// диапазон, в котором ищутся кодпоинты с ненулевыми классами комбинирования
const COMBINING_SCAN_LIMIT: u32 = 0x20000;
/// тайские и лаосские согласные, перед которыми переставляются гласные
const SWAP_CONSONANTS: [RangeInclusive<u16>; 2] = [0x0E01 ..= 0x0E2E, 0x0E81 ..= 0x0EAE];

/// сборка таблицы весов
#[derive(Debug, Clone)]
pub struct TableBuilder
{
    /// кодпоинт -> CE
    mappings: BTreeMap<u32, Vec<Ce>>,
    /// последовательность кодпоинтов (NFD) -> CE
    contractions: BTreeMap<Vec<u32>, Vec<Ce>>,
    /// десятичные цифры: значение и обычный CE
    digits: BTreeMap<u32, (u8, Ce)>,
    hiragana: Vec<RangeInclusive<u32>>,
    compressible: [bool; 256],
    constants: KeyConstants,
    defaults: Settings,
}

impl Default for TableBuilder
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl TableBuilder
{
    /// пустая таблица: все кодпоинты получают вычисляемые веса
    pub fn new() -> Self
    {
        let mut compressible = [false; 256];

        for group in Group::ALL.into_iter().filter(|group| group.is_compressible()) {
            for lead in group.leads() {
                compressible[lead as usize] = true;
            }
        }

        Self {
            mappings: BTreeMap::new(),
            contractions: BTreeMap::new(),
            digits: BTreeMap::new(),
            hiragana: vec![],
            compressible,
            constants: KeyConstants::default(),
            defaults: Settings::default(),
        }
    }

    /// начать с корневой таблицы
    pub fn from_root() -> Self
    {
        crate::data::root_builder().clone()
    }

    /// CE кодпоинта; пустой список - полностью игнорируемый кодпоинт.
    /// для раскладывающегося кодпоинта добавляется сокращение его NFD
    pub fn map(&mut self, code: u32, ces: &[Ce]) -> &mut Self
    {
        self.digits.remove(&code);
        self.mappings.insert(code, ces.to_vec());

        if let Some(decomposition) = decomposition(code) {
            if decomposition.len() > 1 {
                self.contractions.insert(decomposition.to_vec(), ces.to_vec());
            }
        }

        self
    }

    /// CE строки: одиночный кодпоинт - обычное соответствие, несколько - сокращение
    pub fn contraction(&mut self, text: &str, ces: &[Ce]) -> &mut Self
    {
        let mut chars = text.chars();

        if let (Some(c), None) = (chars.next(), chars.next()) {
            return self.map(c as u32, ces);
        }

        self.contractions.insert(text.nfd().map(|c| c as u32).collect(), ces.to_vec());

        self
    }

    /// десятичная цифра: значение для числового режима и CE для обычного
    pub fn digit(&mut self, code: u32, value: u8, ce: Ce) -> &mut Self
    {
        self.mappings.remove(&code);
        self.digits.insert(code, (value.min(9), ce));

        self
    }

    /// кодпоинты хираганы (отдельный вес на 4-м уровне)
    pub fn hiragana(&mut self, range: RangeInclusive<u32>) -> &mut Self
    {
        self.hiragana.push(range);

        self
    }

    /// сжимаемость старшего байта первичных весов
    pub fn compressible(&mut self, lead: u8, compressible: bool) -> &mut Self
    {
        self.compressible[lead as usize] = compressible;

        self
    }

    pub fn constants(&mut self, constants: KeyConstants) -> &mut Self
    {
        self.constants = constants;

        self
    }

    /// настройки по умолчанию для сопоставителей таблицы
    pub fn defaults(&mut self, settings: Settings) -> &mut Self
    {
        self.defaults = settings;

        self
    }

    /// CE кодпоинта, если он задан явно
    pub fn get(&self, code: u32) -> Option<&[Ce]>
    {
        match self.digits.get(&code) {
            Some((_, ce)) => Some(core::slice::from_ref(ce)),
            None => self.mappings.get(&code).map(Vec::as_slice),
        }
    }

    /// собрать таблицу
    pub fn build(&self) -> Result<WeightTable, TableError>
    {
        self.validate_groups()?;

        for (&code, ces) in &self.mappings {
            self.validate(code, ces)?;
        }

        for (codes, ces) in &self.contractions {
            let code = codes.first().copied().unwrap_or_default();

            if ces.is_empty() {
                return Err(TableError::EmptyMapping { code });
            }

            self.validate(code, ces)?;
        }

        for (&code, (_, ce)) in &self.digits {
            self.validate(code, core::slice::from_ref(ce))?;
        }

        let mut expansions = ExpansionsBuilder::default();
        let mut values: BTreeMap<u32, u32> = BTreeMap::new();
        let mut contractions = ContractionsBuilder::default();

        for (codes, ces) in &self.contractions {
            let code = codes.first().copied().unwrap_or_default();

            contractions.insert(codes, expansions.store(code, ces)?)?;
        }

        for (&code, ces) in &self.mappings {
            values.insert(code, expansions.store(code, ces)?);
        }

        for (&code, &(value, ce)) in &self.digits {
            let offset = expansions.push(&[ce])?;
            values.insert(code, TableValue::Digit { value, offset }.to_raw());
        }

        for code in HANGUL_S_BASE .. HANGUL_S_BASE + HANGUL_S_COUNT {
            values.entry(code).or_insert(TableValue::Hangul.to_raw());
        }

        let mut unsafe_units = UnitSet::new();
        let mut closure = 0;

        let continuations: HashSet<u32> = self
            .contractions
            .keys()
            .flat_map(|codes| codes.iter().skip(1).copied())
            .collect();

        // каноническое замыкание: предсоставленные символы получают CE своей NFD-формы
        for code in CLOSURE_RANGES.into_iter().flatten() {
            if values.contains_key(&code) {
                continue;
            }

            let Some(decomposition) = decomposition(code) else {
                continue;
            };

            // предсоставленный символ может продолжать сокращение
            if continuations.contains(&decomposition[0]) {
                mark_unsafe(&mut unsafe_units, code);
            }

            let ces: Vec<Ce> = decomposition
                .iter()
                .flat_map(|&code| self.elements_of(code))
                .collect();

            let value = match decomposition.iter().any(|&code| contractions.is_starter(code))
                || ces.len() > MAX_EXPANSION_LEN
            {
                true => TableValue::Decomposition.to_raw(),
                false => expansions.store(code, &ces)?,
            };

            values.insert(code, value);
            closure += 1;
        }

        let starters: Vec<u32> = contractions.starters().collect();
        let (contractions, roots) = contractions.build(|code| {
            values
                .get(&code)
                .copied()
                .unwrap_or(TableValue::Implicit.to_raw())
        })?;

        for (code, root) in roots {
            values.insert(code, TableValue::Contraction(root).to_raw());
        }

        // небезопасные кодовые единицы
        for code in 0 .. COMBINING_SCAN_LIMIT {
            if fcd_values(code).0 != 0 || ccc(code) != 0 {
                mark_unsafe(&mut unsafe_units, code);
            }
        }

        for code in contractions.continuations() {
            mark_unsafe(&mut unsafe_units, code);
        }

        for unit in SWAP_CONSONANTS.into_iter().flatten().chain(0xDC00 ..= 0xDFFF) {
            unsafe_units.insert(unit);
        }

        for (&code, ces) in &self.mappings {
            if ces.first().is_some_and(|ce| ce.primary() == 0 && !ce.is_ignorable()) {
                mark_unsafe(&mut unsafe_units, code);
            }
        }

        let trie = CodepointTrie::build(&values, TableValue::Implicit.to_raw())?;

        let mut table = WeightTable {
            trie,
            expansions: expansions.ces,
            contractions,
            unsafe_units,
            hiragana: self.hiragana.clone(),
            compressible: self.compressible,
            group_last: self.group_last_primaries(),
            fast: None,
            constants: self.constants,
            defaults: Arc::new(Settings::default()),
        };

        table.fast = FastLatin::build(&table);

        let mut defaults = self.defaults.clone();
        defaults.refresh(&table)?;
        table.defaults = Arc::new(defaults);

        debug!(
            mappings = self.mappings.len(),
            contractions = self.contractions.len(),
            starters = starters.len(),
            digits = self.digits.len(),
            closure,
            expansions = table.expansions.len(),
            trie_data = table.trie.data_len(),
            unsafe_units = table.unsafe_units.len(),
            fast_latin = table.fast.as_ref().map_or(0, FastLatin::coverage),
            "weight table built"
        );

        Ok(table)
    }

    /// CE кодпоинта для замыкания
    fn elements_of(&self, code: u32) -> Vec<Ce>
    {
        match self.get(code) {
            Some(ces) => ces.to_vec(),
            None => implicit_elements(code).to_vec(),
        }
    }

    /// последний первичный вес каждой группы
    fn group_last_primaries(&self) -> [u16; Group::COUNT]
    {
        let mut last = [0u16; Group::COUNT];

        let all = self
            .mappings
            .values()
            .chain(self.contractions.values())
            .flatten()
            .chain(self.digits.values().map(|(_, ce)| ce));

        for ce in all.filter(|ce| !ce.is_continuation() && ce.primary() != 0) {
            if let Some(group) = Group::of_lead(ce.lead_byte()) {
                let slot = &mut last[group as usize];
                *slot = (*slot).max(ce.primary());
            }
        }

        for group in Group::ALL {
            if last[group as usize] == 0 {
                last[group as usize] = ((*group.leads().end() as u16) << 8) | 0xFF;
            }
        }

        last
    }

    /// старшие байты переменных групп должны быть меньше весов сжатия 4-го уровня
    fn validate_groups(&self) -> Result<(), TableError>
    {
        let limit = self.constants.quaternary_shifted_limit();

        for group in Group::ALL.into_iter().filter(|group| group.is_variable()) {
            let lead = *group.leads().end();

            if lead >= limit {
                return Err(TableError::VariableLeadByte(lead));
            }
        }

        Ok(())
    }

    /// проверить CE соответствия
    fn validate(&self, code: u32, ces: &[Ce]) -> Result<(), TableError>
    {
        let mut base: Option<Ce> = None;

        for &ce in ces {
            if ce.is_ignorable() {
                continue;
            }

            if ce == MERGE_SEPARATOR_CE {
                base = Some(ce);
                continue;
            }

            self.validate_weights(code, ce)?;

            if !ce.is_continuation() {
                base = Some(ce);
                continue;
            }

            let misplaced = match base {
                None => true,
                Some(base) => {
                    let lead = base.lead_byte();

                    base.primary() != 0
                        && (self.compressible[lead as usize]
                            || Group::of_lead(lead).is_some_and(Group::is_variable))
                }
            };

            if misplaced {
                return Err(TableError::MisplacedContinuation { code });
            }

            let [high, low] = ce.primary().to_be_bytes();

            if ce.primary() != 0 && (high <= MERGE_SEPARATOR_WEIGHT || low <= MERGE_SEPARATOR_WEIGHT) {
                return Err(TableError::SecondPrimaryByte { code });
            }
        }

        Ok(())
    }

    /// проверить веса одного CE
    fn validate_weights(&self, code: u32, ce: Ce) -> Result<(), TableError>
    {
        let (p, s, t) = (ce.primary(), ce.secondary(), ce.tertiary());

        let ill_formed = match ce.is_continuation() {
            true => s != 0 && t == 0,
            false => (p != 0 && (s == 0 || t == 0)) || (s != 0 && t == 0),
        };

        if ill_formed {
            return Err(TableError::IllFormedElement { code, ce: ce.0 });
        }

        if p != 0 && !ce.is_continuation() {
            let [lead, second] = p.to_be_bytes();

            if lead <= MERGE_SEPARATOR_LEAD || lead >= FIRST_IMPLICIT_LEAD {
                return Err(TableError::ReservedLeadByte { code, lead });
            }

            match self.compressible[lead as usize] {
                true => {
                    if !(0x04 ..= 0xFE).contains(&second) {
                        return Err(TableError::CompressibleSecondByte { code, byte: second });
                    }
                }
                false => {
                    if second < MERGE_SEPARATOR_WEIGHT {
                        return Err(TableError::SecondPrimaryByte { code });
                    }
                }
            }
        }

        if s != 0 && s != COMMON_WEIGHT {
            let below_common = (MERGE_SEPARATOR_WEIGHT + 1 .. COMMON_WEIGHT).contains(&s);
            let above_compression = s > self.constants.secondary.high;

            if !below_common && !above_compression {
                return Err(TableError::SecondaryWeight { code, weight: s });
            }
        }

        if t != 0 {
            // третично-значимые элементы (0.0.t) не должны попадать в диапазон общего веса
            let min = match s == 0 {
                true => COMMON_WEIGHT + 1,
                false => MERGE_SEPARATOR_WEIGHT + 1,
            };

            if t < min {
                return Err(TableError::TertiaryWeight { code, weight: t });
            }
        }

        Ok(())
    }
}

/// пометить кодпоинт как небезопасный (для дополнительных плоскостей - ведущий суррогат)
fn mark_unsafe(units: &mut UnitSet, code: u32)
{
    match code {
        0 ..= 0xFFFF => units.insert(code as u16),
        0x10000 ..= 0x10FFFF => units.insert((0xD7C0 + (code >> 10)) as u16),
        _ => (),
    }
}

/// таблица расширений с объединением одинаковых последовательностей
#[derive(Default)]
struct ExpansionsBuilder
{
    ces: Vec<Ce>,
    known: HashMap<Vec<Ce>, u32>,
}

impl ExpansionsBuilder
{
    /// упакованное значение для списка CE: одиночный CE или ссылка на расширение
    fn store(&mut self, code: u32, ces: &[Ce]) -> Result<u32, TableError>
    {
        match ces {
            [] => Ok(Ce::IGNORABLE.0),
            [ce] if !ce.is_continuation() && TableValue::is_storable_ce(*ce) => Ok(ce.0),
            _ if ces.len() > MAX_EXPANSION_LEN => Err(TableError::ExpansionTooLong {
                code,
                len: ces.len(),
            }),
            _ => {
                let offset = self.push(ces)?;

                Ok(TableValue::Expansion {
                    offset,
                    len: ces.len() as u8,
                }
                .to_raw())
            }
        }
    }

    /// смещение последовательности в таблице
    fn push(&mut self, ces: &[Ce]) -> Result<u32, TableError>
    {
        if let Some(&offset) = self.known.get(ces) {
            return Ok(offset);
        }

        let offset = self.ces.len();

        if offset > MAX_PAYLOAD_OFFSET {
            return Err(TableError::Overflow("expansions"));
        }

        self.ces.extend_from_slice(ces);
        self.known.insert(ces.to_vec(), offset as u32);

        Ok(offset as u32)
    }
}
