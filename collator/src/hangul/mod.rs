/// начало блока слогов хангыль
pub const HANGUL_S_BASE: u32 = 0xAC00;
/// количество слогов
pub const HANGUL_S_COUNT: u32 = 11172;
/// начальные согласные (L)
const HANGUL_L_BASE: u32 = 0x1100;
/// гласные (V)
const HANGUL_V_BASE: u32 = 0x1161;
/// завершающие согласные (T), первый - "пустой"
const HANGUL_T_BASE: u32 = 0x11A7;
/// количество гласных * количество завершающих согласных
const HANGUL_N_COUNT: u32 = 588;
/// количество завершающих согласных
const HANGUL_T_COUNT: u32 = 27;
/// количество кодпоинтов на блок LV
const HANGUL_T_BLOCK_SIZE: u32 = HANGUL_T_COUNT + 1;

/*
    слоги не хранятся в таблице весов: вместо этого они раскладываются на чамо, веса которых
    берутся из таблицы. так сокращения и перестановки групп, заданные для чамо, продолжают
    работать и для слогов.
*/

/// является ли кодпоинт слогом хангыль
#[inline(always)]
pub fn is_hangul_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// разложить слог хангыль на чамо: L, V и (необязательно) T
#[inline(always)]
pub fn decompose_syllable(code: u32) -> ([u32; 3], usize)
{
    let lvt = code.wrapping_sub(HANGUL_S_BASE);

    let l = lvt / HANGUL_N_COUNT;
    let v = (lvt % HANGUL_N_COUNT) / HANGUL_T_BLOCK_SIZE;
    let t = lvt % HANGUL_T_BLOCK_SIZE;

    let jamo = [HANGUL_L_BASE + l, HANGUL_V_BASE + v, HANGUL_T_BASE + t];

    match t {
        0 => (jamo, 2),
        _ => (jamo, 3),
    }
}
