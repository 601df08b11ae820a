// все опции - см. UTS #35, https://www.unicode.org/reports/tr35/tr35-collation.html

use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::table::{Group, Reordering, WeightTable};

mod keywords;

/// уровень сравнения
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strength
{
    /// базовые символы
    Primary = 1,
    /// диакритические знаки
    Secondary = 2,
    /// регистр / варианты
    #[default]
    Tertiary = 3,
    /// пунктуация (при сдвиге переменных весов), хирагана
    Quaternary = 4,
    /// кодпоинты NFD-формы строки
    Identical = 5,
}

impl TryFrom<u8> for Strength
{
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error>
    {
        Ok(match value {
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Tertiary,
            4 => Self::Quaternary,
            5 => Self::Identical,
            _ => return Err(ConfigError::InvalidStrength(value)),
        })
    }
}

/// тип сравнения переменных весов
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlternateHandling
{
    /// переменные веса не игнорируются
    #[default]
    NonIgnorable = 0,
    /// со сдвигом переменных весов на 4-й уровень
    Shifted = 1,
}

/// порядок регистров
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaseFirst
{
    /// регистр учитывается только третичным весом
    #[default]
    Off = 0,
    /// строчные раньше прописных
    Lower = 1,
    /// прописные раньше строчных
    Upper = 2,
}

/// производные значения: пересчитываются при каждом изменении настроек
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Derived
{
    /// последний первичный вес, считающийся переменным; 0 - сдвиг выключен
    pub variable_top: u16,
    /// перестановка старших байтов первичных весов
    pub reordering: Option<Arc<Reordering>>,
    /// можно ли сравнивать строки по таблице быстрого пути
    pub fast_path: bool,
}

/// настройки сопоставления
///
/// значения по умолчанию берутся из таблицы весов и разделяются между всеми сопоставителями
/// этой таблицы; при первом изменении сопоставитель получает собственную копию
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings
{
    pub(crate) strength: Strength,
    pub(crate) case_level: bool,
    pub(crate) french: bool,
    pub(crate) alternate: AlternateHandling,
    pub(crate) max_variable: Group,
    pub(crate) case_first: CaseFirst,
    pub(crate) numeric: bool,
    pub(crate) hiragana_quaternary: bool,
    pub(crate) reorder_codes: Vec<Group>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) derived: Derived,
}

impl Default for Settings
{
    fn default() -> Self
    {
        Self {
            strength: Strength::default(),
            case_level: false,
            french: false,
            alternate: AlternateHandling::default(),
            max_variable: Group::Punctuation,
            case_first: CaseFirst::default(),
            numeric: false,
            hiragana_quaternary: false,
            reorder_codes: vec![],
            derived: Derived::default(),
        }
    }
}

// производные значения однозначно определяются остальными полями и таблицей
impl Hash for Settings
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.strength.hash(state);
        self.case_level.hash(state);
        self.french.hash(state);
        self.alternate.hash(state);
        self.max_variable.hash(state);
        self.case_first.hash(state);
        self.numeric.hash(state);
        self.hiragana_quaternary.hash(state);
        self.reorder_codes.hash(state);
    }
}

impl Settings
{
    pub fn strength(&self) -> Strength
    {
        self.strength
    }

    pub fn case_level(&self) -> bool
    {
        self.case_level
    }

    pub fn french(&self) -> bool
    {
        self.french
    }

    pub fn alternate(&self) -> AlternateHandling
    {
        self.alternate
    }

    pub fn max_variable(&self) -> Group
    {
        self.max_variable
    }

    pub fn case_first(&self) -> CaseFirst
    {
        self.case_first
    }

    pub fn numeric(&self) -> bool
    {
        self.numeric
    }

    pub fn hiragana_quaternary(&self) -> bool
    {
        self.hiragana_quaternary
    }

    pub fn reorder_codes(&self) -> &[Group]
    {
        &self.reorder_codes
    }

    /// настройки по умолчанию с примененными ключевыми словами UTS #35
    pub fn from_keywords(keywords: &str) -> Result<Self, ConfigError>
    {
        let mut settings = Self::default();
        keywords::apply_keywords(&mut settings, keywords)?;

        Ok(settings)
    }

    /// последний переменный первичный вес (граница для сдвига)
    pub fn variable_top(&self) -> u16
    {
        self.derived.variable_top
    }

    /// применим ли быстрый путь сравнения
    pub fn fast_path(&self) -> bool
    {
        self.derived.fast_path
    }

    /// сдвиг переменных весов: граница или 0, если сдвиг выключен
    #[inline]
    pub(crate) fn shift_top(&self) -> u16
    {
        match self.alternate {
            AlternateHandling::Shifted => self.derived.variable_top,
            AlternateHandling::NonIgnorable => 0,
        }
    }

    #[inline]
    pub(crate) fn reordering(&self) -> Option<&Reordering>
    {
        self.derived.reordering.as_deref()
    }

    /// нужен ли 4-й уровень
    #[inline]
    pub(crate) fn has_quaternary(&self) -> bool
    {
        self.strength >= Strength::Quaternary
            && (self.alternate == AlternateHandling::Shifted || self.hiragana_quaternary)
    }

    /// проверить настройки и пересчитать производные значения для таблицы
    pub(crate) fn refresh(&mut self, table: &WeightTable) -> Result<(), ConfigError>
    {
        if !self.max_variable.is_variable() {
            return Err(ConfigError::InvalidMaxVariable(self.max_variable));
        }

        let reordering = Reordering::new(&self.reorder_codes)?.map(Arc::new);

        let fast_path = !self.french
            && !self.case_level
            && !self.numeric
            && !self.hiragana_quaternary
            && self.alternate == AlternateHandling::NonIgnorable
            && reordering.is_none()
            && table.fast_latin().is_some();

        self.derived = Derived {
            variable_top: table.group_last_primary(self.max_variable),
            reordering,
            fast_path,
        };

        Ok(())
    }

    /// группа, чей последний вес становится верхней границей переменных весов
    pub(crate) fn variable_group_of(table: &WeightTable, primary: u16) -> Result<Group, ConfigError>
    {
        let group = Group::of_lead((primary >> 8) as u8)
            .filter(|group| group.is_variable())
            .ok_or(ConfigError::InvalidVariableTop(primary))?;

        match primary <= table.group_last_primary(group) {
            true => Ok(group),
            false => Err(ConfigError::InvalidVariableTop(primary)),
        }
    }
}

pub use keywords::apply_keywords;
