// уровень Identical в ключе: разностное кодирование кодпоинтов NFD-формы (BOCU-1)
//
// каждый кодпоинт записывается как разность с опорным значением, полученным из предыдущего
// кодпоинта. байты 00..02 не используются: 02 - разделитель слияния (U+FFFE)

use crate::compare::for_each_nfd_code;
use crate::weights::MERGE_SEPARATOR_WEIGHT;

const SLOPE_MIN: i32 = 3;
const SLOPE_MAX: i32 = 0xFF;
const SLOPE_MIDDLE: i32 = 0x81;
const SLOPE_TAIL_COUNT: i32 = SLOPE_MAX - SLOPE_MIN + 1;

const SLOPE_SINGLE: i32 = 80;
const SLOPE_LEAD_2: i32 = 42;
const SLOPE_LEAD_3: i32 = 3;

const SLOPE_REACH_POS_1: i32 = SLOPE_SINGLE;
const SLOPE_REACH_NEG_1: i32 = -SLOPE_SINGLE;
const SLOPE_REACH_POS_2: i32 = SLOPE_LEAD_2 * SLOPE_TAIL_COUNT + (SLOPE_LEAD_2 - 1);
const SLOPE_REACH_NEG_2: i32 = -SLOPE_REACH_POS_2 - 1;
const SLOPE_REACH_POS_3: i32 = SLOPE_LEAD_3 * SLOPE_TAIL_COUNT * SLOPE_TAIL_COUNT
    + (SLOPE_LEAD_3 - 1) * SLOPE_TAIL_COUNT
    + (SLOPE_TAIL_COUNT - 1);
const SLOPE_REACH_NEG_3: i32 = -SLOPE_REACH_POS_3 - 1;

const SLOPE_START_POS_2: i32 = SLOPE_MIDDLE + SLOPE_SINGLE + 1;
const SLOPE_START_POS_3: i32 = SLOPE_START_POS_2 + SLOPE_LEAD_2;
const SLOPE_START_NEG_2: i32 = SLOPE_MIDDLE + SLOPE_REACH_NEG_1;
const SLOPE_START_NEG_3: i32 = SLOPE_START_NEG_2 - SLOPE_LEAD_2;

/// записать уровень Identical для текста
pub fn write_identical(units: &[u16], out: &mut Vec<u8>)
{
    let mut prev: i32 = 0;

    for_each_nfd_code(units, |code| {
        let code = code as i32;

        // опорное значение - середина блока предыдущего кодпоинта; для хань - середина диапазона
        prev = match (0x4E00 .. 0xA000).contains(&prev) {
            true => 0x9FFF - SLOPE_REACH_POS_2,
            false => (prev & !0x7F) - SLOPE_REACH_NEG_1,
        };

        match code {
            0xFFFE => {
                out.push(MERGE_SEPARATOR_WEIGHT);
                prev = 0;
            }
            _ => {
                write_diff(code - prev, out);
                prev = code;
            }
        }
    });
}

/// деление с остатком, округляющее частное вниз
#[inline]
fn div_mod_floor(value: i32) -> (i32, u8)
{
    (
        value.div_euclid(SLOPE_TAIL_COUNT),
        (SLOPE_MIN + value.rem_euclid(SLOPE_TAIL_COUNT)) as u8,
    )
}

/// записать разность 1..4 байтами
fn write_diff(diff: i32, out: &mut Vec<u8>)
{
    if diff >= SLOPE_REACH_NEG_1 {
        if diff <= SLOPE_REACH_POS_1 {
            out.push((SLOPE_MIDDLE + diff) as u8);
            return;
        }

        let (rest, last) = div_mod_floor(diff);

        if diff <= SLOPE_REACH_POS_2 {
            out.extend_from_slice(&[(SLOPE_START_POS_2 + rest) as u8, last]);
            return;
        }

        let (rest, middle) = div_mod_floor(rest);

        if diff <= SLOPE_REACH_POS_3 {
            out.extend_from_slice(&[(SLOPE_START_POS_3 + rest) as u8, middle, last]);
            return;
        }

        let (_, first) = div_mod_floor(rest);
        out.extend_from_slice(&[SLOPE_MAX as u8, first, middle, last]);
    } else {
        let (rest, last) = div_mod_floor(diff);

        if diff >= SLOPE_REACH_NEG_2 {
            out.extend_from_slice(&[(SLOPE_START_NEG_2 + rest) as u8, last]);
            return;
        }

        let (rest, middle) = div_mod_floor(rest);

        if diff >= SLOPE_REACH_NEG_3 {
            out.extend_from_slice(&[(SLOPE_START_NEG_3 + rest) as u8, middle, last]);
            return;
        }

        let (_, first) = div_mod_floor(rest);
        out.extend_from_slice(&[SLOPE_MIN as u8, first, middle, last]);
    }
}
