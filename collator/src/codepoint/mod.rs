// кодпоинты: чтение UTF-16, канонические классы комбинирования, декомпозиции

use smallvec::SmallVec;
use unicode_normalization::char::{canonical_combining_class, decompose_canonical};
use unicode_normalization::UnicodeNormalization;

mod iter;

pub use iter::CodepointsIter;

/// полная каноническая декомпозиция кодпоинта
pub type Decomposition = SmallVec<[u32; 4]>;

/// кодпоинты ниже этой границы не раскладываются и имеют нулевой класс комбинирования
const FCD_FAST_LIMIT: u32 = 0xC0;

/// кодпоинт, начинающийся с позиции, и количество его кодовых единиц;
/// одиночные суррогаты возвращаются как есть
#[inline(always)]
pub fn next_code(units: &[u16], pos: usize) -> Option<(u32, usize)>
{
    let first = *units.get(pos)? as u32;

    if (0xD800 .. 0xDC00).contains(&first) {
        if let Some(&second) = units.get(pos + 1) {
            let second = second as u32;

            if (0xDC00 .. 0xE000).contains(&second) {
                return Some((0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00), 2));
            }
        }
    }

    Some((first, 1))
}

/// канонический класс комбинирования
#[inline]
pub fn ccc(code: u32) -> u8
{
    match code < 0x300 {
        true => 0,
        false => char::from_u32(code).map_or(0, canonical_combining_class),
    }
}

/// полная каноническая декомпозиция; None - кодпоинт не раскладывается
pub fn decomposition(code: u32) -> Option<Decomposition>
{
    if code < FCD_FAST_LIMIT {
        return None;
    }

    let c = char::from_u32(code)?;
    let mut result = Decomposition::new();

    decompose_canonical(c, |d| result.push(d as u32));

    match result.len() == 1 && result[0] == code {
        true => None,
        false => Some(result),
    }
}

/// классы комбинирования первого и последнего кодпоинтов декомпозиции (lccc, tccc)
#[inline]
pub fn fcd_values(code: u32) -> (u8, u8)
{
    if code < FCD_FAST_LIMIT {
        return (0, 0);
    }

    match decomposition(code) {
        Some(decomposition) => (
            ccc(decomposition[0]),
            ccc(decomposition[decomposition.len() - 1]),
        ),
        None => {
            let value = ccc(code);
            (value, value)
        }
    }
}

/// находится ли текст в форме FCD: конкатенация декомпозиций его кодпоинтов
/// не требует канонической перестановки
pub fn is_fcd(units: &[u16]) -> bool
{
    let mut pos = 0;
    let mut prev_trail = 0;

    while let Some((code, len)) = next_code(units, pos) {
        let (lead, trail) = fcd_values(code);

        if lead != 0 && lead < prev_trail {
            return false;
        }

        prev_trail = trail;
        pos += len;
    }

    true
}

/// кодпоинты NFD-формы текста; одиночные суррогаты сохраняются
pub fn for_each_nfd<F>(units: &[u16], mut f: F)
where
    F: FnMut(u32),
{
    let mut run = String::new();

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => run.push(c),
            Err(error) => {
                run.nfd().for_each(|c| f(c as u32));
                run.clear();

                f(error.unpaired_surrogate() as u32);
            }
        }
    }

    run.nfd().for_each(|c| f(c as u32));
}
