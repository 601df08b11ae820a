use thiserror::Error;

use crate::table::Group;

/// отклонённая конфигурация: неверное значение настройки или ключевого слова UTS #35
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError
{
    #[error("strength value {0} is out of range 1..=5")]
    InvalidStrength(u8),

    #[error("variable top {0:#06X} is not a primary weight of a variable group")]
    InvalidVariableTop(u16),

    #[error("group {0:?} cannot be the maximum variable group")]
    InvalidMaxVariable(Group),

    #[error("group {0:?} is a variable group and cannot be reordered")]
    ReorderVariableGroup(Group),

    #[error("reorder code {0:?} is listed more than once")]
    DuplicateReorderCode(Group),

    #[error("unknown collation keyword {0:?}")]
    UnknownKeyword(String),

    #[error("invalid value {value:?} for collation keyword {key:?}")]
    InvalidKeywordValue
    {
        key: String, value: String
    },

    #[error("unknown script or group code {0:?}")]
    UnknownGroup(String),
}

/// ошибка построения таблицы весов
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError
{
    #[error("U+{code:04X}: primary lead byte {lead:#04X} is reserved")]
    ReservedLeadByte
    {
        code: u32, lead: u8
    },

    #[error("U+{code:04X}: second primary byte {byte:#04X} is outside the compressible range 04..FE")]
    CompressibleSecondByte
    {
        code: u32, byte: u8
    },

    #[error("U+{code:04X}: second primary byte must not be below 02")]
    SecondPrimaryByte
    {
        code: u32
    },

    #[error("U+{code:04X}: secondary weight {weight:#04X} collides with the common-weight compression range")]
    SecondaryWeight
    {
        code: u32, weight: u8
    },

    #[error("U+{code:04X}: tertiary weight {weight:#04X} is outside 03..3F")]
    TertiaryWeight
    {
        code: u32, weight: u8
    },

    #[error("U+{code:04X}: collation element {ce:#010X} is not well-formed")]
    IllFormedElement
    {
        code: u32, ce: u32
    },

    #[error("U+{code:04X}: continuation element follows a compressible or variable primary")]
    MisplacedContinuation
    {
        code: u32
    },

    #[error("U+{code:04X}: expansion of {len} elements does not fit the table")]
    ExpansionTooLong
    {
        code: u32, len: usize
    },

    #[error("U+{code:04X}: mapping has no collation elements")]
    EmptyMapping
    {
        code: u32
    },

    #[error("contraction must contain at least two code points")]
    ShortContraction,

    #[error("variable group lead byte {0:#04X} collides with the quaternary compression range")]
    VariableLeadByte(u8),

    #[error("table overflow: {0}")]
    Overflow(&'static str),

    #[error("invalid default settings: {0}")]
    InvalidDefaults(#[from] ConfigError),
}
