use crate::collation_element::{Case, Ce};
use crate::weights::{COMMON_WEIGHT, MIN_TAIL_BYTE};

// вычисляемые веса: [.AAAA.05.05][+BBBB.00.00]
//
// первый элемент - база блока (AAAA), второй - продолжение с младшими 15 битами кодпоинта,
// разложенными на два байта, каждый из которых не меньше MIN_TAIL_BYTE

/// количество значений байта продолжения
const TAIL_BYTES: u32 = 252;

/// рассчитать вычисляемые веса кодпоинта
#[inline(never)]
pub fn implicit_elements(code: u32) -> [Ce; 2]
{
    // сначала проверим хань

    if is_han_core(code) {
        return pair(0xFB40 + (code >> 15), code & 0x7FFF);
    }

    if is_han_other(code) {
        return pair(0xFB80 + (code >> 15), code & 0x7FFF);
    }

    // вымершие письменности - собственные базы

    if is_tangut(code) {
        return pair(0xFB00, code - 0x17000);
    }

    if is_nushu(code) {
        return pair(0xFB01, code - 0x1B170);
    }

    if is_khitan(code) {
        return pair(0xFB02, code - 0x18B00);
    }

    // любой другой кодпоинт, включая одиночные суррогаты
    pair(0xFBC0 + (code >> 15), code & 0x7FFF)
}

#[inline(always)]
fn pair(base: u32, offset: u32) -> [Ce; 2]
{
    let high = (MIN_TAIL_BYTE as u32 + offset / TAIL_BYTES) as u16;
    let low = (MIN_TAIL_BYTE as u32 + offset % TAIL_BYTES) as u16;

    [
        Ce::new(base as u16, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT),
        Ce::continuation((high << 8) | low, 0, 0),
    ]
}

/// Основные иероглифы унификации Хань
/// https://en.wikipedia.org/wiki/CJK_Unified_Ideographs
///
/// ```text
/// U+4E00 ..= U+9FFF
/// ```
///
/// TR10: Unified_Ideograph=True AND ((Block=CJK_Unified_Ideograph) OR (Block=CJK_Compatibility_Ideographs))
pub fn is_han_core(code: u32) -> bool
{
    (0x4E00 ..= 0x9FFF).contains(&code)
        || matches!(
            code,
            0xFA0E | 0xFA0F | 0xFA11 | 0xFA13 | 0xFA14 | 0xFA1F | 0xFA21 | 0xFA23 | 0xFA24 | 0xFA27 | 0xFA28 | 0xFA29
        )
}

/// Иероглифы унификации Хань (прочие)
///
/// TR10: Unified_Ideograph=True AND NOT ((Block=CJK_Unified_Ideograph) OR (Block=CJK_Compatibility_Ideographs))
pub fn is_han_other(code: u32) -> bool
{
    [
        (0x3400 ..= 0x4DBF),
        (0x20000 ..= 0x2A6DF),
        (0x2A700 ..= 0x2B739),
        (0x2B740 ..= 0x2B81D),
        (0x2B820 ..= 0x2CEA1),
        (0x2CEB0 ..= 0x2EBE0),
        (0x2EBF0 ..= 0x2EE5D),
        (0x30000 ..= 0x3134A),
        (0x31350 ..= 0x323AF),
    ]
    .iter()
    .any(|range| range.contains(&code))
}

/// Тангутское письмо
///
/// TR10: Assigned code points in Block=Tangut OR Block=Tangut_Components OR Block=Tangut_Supplement
pub fn is_tangut(code: u32) -> bool
{
    [
        (0x17000 ..= 0x187F7),
        (0x18800 ..= 0x18AFF),
        (0x18D00 ..= 0x18D08),
    ]
    .iter()
    .any(|range| range.contains(&code))
}

/// Нюй-шу
///
/// TR10: Assigned code points in Block=Nushu
pub fn is_nushu(code: u32) -> bool
{
    (0x1B170 ..= 0x1B2FB).contains(&code)
}

/// Киданьская письменность
///
/// TR10: Assigned code points in Block=Khitan_Small_Script
pub fn is_khitan(code: u32) -> bool
{
    (0x18B00 ..= 0x18CD5).contains(&code)
}
