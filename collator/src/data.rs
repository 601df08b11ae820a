// корневая таблица весов
//
// явно задаются только нераскладывающиеся кодпоинты: предсоставленные символы получают веса
// при каноническом замыкании, хань и все остальное - вычисляемые веса

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::collation_element::{Case, Ce};
use crate::error::TableError;
use crate::table::{Group, TableBuilder, WeightTable, MERGE_SEPARATOR_CE};
use crate::weights::COMMON_WEIGHT;

static ROOT_BUILDER: Lazy<TableBuilder> = Lazy::new(root_table_builder);
static ROOT: Lazy<Result<Arc<WeightTable>, TableError>> =
    Lazy::new(|| ROOT_BUILDER.build().map(Arc::new));

/// сборка корневой таблицы (основа для изменённых таблиц)
pub(crate) fn root_builder() -> &'static TableBuilder
{
    &ROOT_BUILDER
}

/// корневая таблица; собирается один раз и разделяется всеми сопоставителями
pub fn root() -> Result<Arc<WeightTable>, TableError>
{
    ROOT.clone()
}

/// третичный вес прописных букв
const UPPER_TERTIARY: u8 = 0x0B;
/// третичный вес вариантов написания (ς, ſ, µ)
const VARIANT_TERTIARY: u8 = 0x06;
/// третичный вес надстрочных и дробных форм
const SUPERSCRIPT_TERTIARY: u8 = 0x14;
/// третичный вес пробелов совместимости
const COMPAT_SPACE_TERTIARY: u8 = 0x1B;

/// первый вторичный вес диакритических знаков
const FIRST_DIACRITIC: u8 = 0x50;

/// полностью игнорируемые кодпоинты
const IGNORABLE: [std::ops::RangeInclusive<u32>; 8] = [
    0x00 ..= 0x08,
    0x0E ..= 0x1F,
    0x7F ..= 0x84,
    0x86 ..= 0x9F,
    0xAD ..= 0xAD,
    0x034F ..= 0x034F,
    0x200B ..= 0x200F,
    0xFEFF ..= 0xFEFF,
];

/// управляющие символы - пробелы (каждый со своим первичным весом)
const CONTROL_SPACES: [u32; 8] = [0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x85, 0x2028, 0x2029];
/// пробелы совместимости: первичный вес пробела
const COMPAT_SPACES: [u32; 14] = [
    0xA0, 0x2002, 0x2003, 0x2004, 0x2005, 0x2006, 0x2007, 0x2008, 0x2009, 0x200A, 0x202F, 0x205F,
    0x3000, 0x1680,
];

const PUNCTUATION: &str = "_-\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2015},;:!¡?¿.…·'‘’‚\"“”„«»‹›()[]{}§¶@*/\\&#%‰†‡•\u{2044}";
const SYMBOLS: &str = "`´^¨¯˘˙˚˝¸˛°©®+±÷×<=>¬|¦~";
const CURRENCY: &str = "¤¢$£¥₩€₹₽";

/// диакритические знаки в порядке вторичных весов
const DIACRITICS: [u32; 33] = [
    0x0301, 0x0300, 0x0306, 0x0302, 0x030C, 0x030A, 0x0308, 0x030B, 0x0303, 0x0307, 0x0327, 0x0328,
    0x0304, 0x0323, 0x0309, 0x031B, 0x0311, 0x030F, 0x0324, 0x0325, 0x0326, 0x032D, 0x032E, 0x0330,
    0x0331, 0x0313, 0x0314, 0x0342, 0x0345, 0x0335, 0x0338, 0x3099, 0x309A,
];
const SHORT_STROKE: u32 = 0x0335;
const LONG_SOLIDUS: u32 = 0x0338;

/// первые кодпоинты десятичных цифр разных письменностей
const DIGIT_ZEROS: [u32; 7] = [0x30, 0x0660, 0x06F0, 0x0966, 0x0E50, 0x0ED0, 0xFF10];
const SUPERSCRIPTS: [(u32, u8); 3] = [(0xB9, 1), (0xB2, 2), (0xB3, 3)];
const FRACTIONS: [(u32, u8, u8); 3] = [(0xBC, 1, 4), (0xBD, 1, 2), (0xBE, 3, 4)];

const LATIN: &str = "aæbcdðefghiıjkĸlłmnŋoœpqrstþuvwxyz";
const GREEK: &str = "αβγδεζηθικλμνξοπρστυφχψω";
const CYRILLIC: &str = "абвгґдђеєжзѕиіјклљмнњопрстћуфхцчџшщъыьэюя";

/// кана: большой знак хираганы и его малая форма; катакана сдвинута на 0x60
const KANA: [&str; 48] = [
    "あぁ", "いぃ", "うぅ", "えぇ", "おぉ", "かゕ", "き", "く", "けゖ", "こ", "さ", "し", "す", "せ",
    "そ", "た", "ち", "つっ", "て", "と", "な", "に", "ぬ", "ね", "の", "は", "ひ", "ふ", "へ", "ほ",
    "ま", "み", "む", "め", "も", "やゃ", "ゆゅ", "よょ", "ら", "り", "る", "れ", "ろ", "わゎ", "ゐ",
    "ゑ", "を", "ん",
];
const KATAKANA_SHIFT: u32 = 0x60;

/// последовательное распределение первичных весов внутри группы
struct Primaries
{
    next: u16,
    step: u16,
}

impl Primaries
{
    fn new(group: Group, step: u16) -> Self
    {
        Self {
            next: ((group.first_lead() as u16) << 8) | 0x04,
            step,
        }
    }

    fn take(&mut self) -> u16
    {
        let primary = self.next;
        let [lead, second] = primary.to_be_bytes();

        self.next = match second as u16 + self.step > 0xFE {
            true => ((lead as u16 + 1) << 8) | 0x04,
            false => primary + self.step,
        };

        primary
    }
}

fn lower(primary: u16, tertiary: u8) -> Ce
{
    Ce::new(primary, COMMON_WEIGHT, Case::Lower, tertiary)
}

fn diacritic(secondary: u8) -> Ce
{
    Ce::new(0, secondary, Case::Lower, COMMON_WEIGHT)
}

/// единственная прописная форма буквы, если она есть
fn single_upper(c: char) -> Option<u32>
{
    let mut upper = c.to_uppercase();

    match (upper.next(), upper.next()) {
        (Some(u), None) if u != c => Some(u as u32),
        _ => None,
    }
}

/// буквы алфавита с прописными формами
fn alphabet(builder: &mut TableBuilder, primaries: &mut Primaries, letters: &str)
{
    for c in letters.chars() {
        let primary = primaries.take();
        builder.map(c as u32, &[lower(primary, COMMON_WEIGHT)]);

        if let Some(upper) = single_upper(c) {
            if builder.get(upper).is_none() {
                builder.map(upper, &[Ce::new(primary, COMMON_WEIGHT, Case::Upper, UPPER_TERTIARY)]);
            }
        }
    }
}

/// символы с собственными первичными весами
fn sequence(builder: &mut TableBuilder, primaries: &mut Primaries, codes: impl IntoIterator<Item = u32>)
{
    for code in codes {
        builder.map(code, &[lower(primaries.take(), COMMON_WEIGHT)]);
    }
}

fn primary_of(builder: &TableBuilder, code: u32) -> u16
{
    builder
        .get(code)
        .and_then(|ces| ces.first())
        .map_or(0, |ce| ce.primary())
}

fn root_table_builder() -> TableBuilder
{
    let mut builder = TableBuilder::new();

    for code in IGNORABLE.into_iter().flatten() {
        builder.map(code, &[]);
    }

    builder.map(0xFFFE, &[MERGE_SEPARATOR_CE]);

    specials(&mut builder);
    diacritics(&mut builder);
    digits(&mut builder);
    latin(&mut builder);
    greek_and_cyrillic(&mut builder);
    thai_and_lao(&mut builder);
    kana(&mut builder);
    hangul_jamo(&mut builder);

    builder
}

/// пробелы, пунктуация, символы, валюта
fn specials(builder: &mut TableBuilder)
{
    let mut spaces = Primaries::new(Group::Space, 4);
    sequence(builder, &mut spaces, CONTROL_SPACES);

    let space = spaces.take();
    builder.map(0x20, &[lower(space, COMMON_WEIGHT)]);

    for code in COMPAT_SPACES {
        builder.map(code, &[lower(space, COMPAT_SPACE_TERTIARY)]);
    }

    sequence(builder, &mut Primaries::new(Group::Punctuation, 4), PUNCTUATION.chars().map(u32::from));
    sequence(builder, &mut Primaries::new(Group::Symbol, 4), SYMBOLS.chars().map(u32::from));
    sequence(builder, &mut Primaries::new(Group::Currency, 4), CURRENCY.chars().map(u32::from));
}

fn diacritics(builder: &mut TableBuilder)
{
    for (index, code) in DIACRITICS.into_iter().enumerate() {
        builder.map(code, &[diacritic(FIRST_DIACRITIC + 2 * index as u8)]);
    }
}

fn secondary_of(builder: &TableBuilder, code: u32) -> u8
{
    builder
        .get(code)
        .and_then(|ces| ces.first())
        .map_or(COMMON_WEIGHT, |ce| ce.secondary())
}

/// десятичные цифры: у цифр разных письменностей одинаковые веса
fn digits(builder: &mut TableBuilder)
{
    let mut primaries = Primaries::new(Group::Digit, 4);
    let weights: Vec<u16> = (0 .. 10).map(|_| primaries.take()).collect();

    for zero in DIGIT_ZEROS {
        for (value, &primary) in weights.iter().enumerate() {
            builder.digit(zero + value as u32, value as u8, lower(primary, COMMON_WEIGHT));
        }
    }

    for (code, value) in SUPERSCRIPTS {
        builder.map(code, &[lower(weights[value as usize], SUPERSCRIPT_TERTIARY)]);
    }

    let slash = primary_of(builder, 0x2044);

    for (code, numerator, denominator) in FRACTIONS {
        builder.map(
            code,
            &[
                lower(weights[numerator as usize], SUPERSCRIPT_TERTIARY),
                lower(slash, SUPERSCRIPT_TERTIARY),
                lower(weights[denominator as usize], SUPERSCRIPT_TERTIARY),
            ],
        );
    }
}

fn latin(builder: &mut TableBuilder)
{
    alphabet(builder, &mut Primaries::new(Group::Latin, 4), LATIN);

    // буквы с перечеркиванием: база и вторичный вес знака
    let stroke = diacritic(secondary_of(builder, SHORT_STROKE));
    let solidus = diacritic(secondary_of(builder, LONG_SOLIDUS));

    for (letter, base, mark) in [('ø', 'o', solidus), ('đ', 'd', stroke), ('ħ', 'h', stroke), ('ŧ', 't', stroke)] {
        let primary = primary_of(builder, base as u32);

        builder.map(letter as u32, &[lower(primary, COMMON_WEIGHT), mark]);

        if let Some(upper) = single_upper(letter) {
            builder.map(upper, &[Ce::new(primary, COMMON_WEIGHT, Case::Upper, UPPER_TERTIARY), mark]);
        }
    }

    let (s, a, o) = (
        primary_of(builder, 's' as u32),
        primary_of(builder, 'a' as u32),
        primary_of(builder, 'o' as u32),
    );

    builder
        .map('ß' as u32, &[lower(s, VARIANT_TERTIARY), lower(s, VARIANT_TERTIARY)])
        .map('ſ' as u32, &[lower(s, VARIANT_TERTIARY)])
        .map('ª' as u32, &[lower(a, SUPERSCRIPT_TERTIARY)])
        .map('º' as u32, &[lower(o, SUPERSCRIPT_TERTIARY)]);
}

fn greek_and_cyrillic(builder: &mut TableBuilder)
{
    alphabet(builder, &mut Primaries::new(Group::Greek, 4), GREEK);

    let sigma = primary_of(builder, 'σ' as u32);
    let mu = primary_of(builder, 'μ' as u32);

    builder
        .map('ς' as u32, &[lower(sigma, VARIANT_TERTIARY)])
        .map('µ' as u32, &[lower(mu, VARIANT_TERTIARY)]);

    alphabet(builder, &mut Primaries::new(Group::Cyrillic, 4), CYRILLIC);
}

/// тайский и лаосский: согласные, гласные, знаки; тоновые знаки - вторичные веса
fn thai_and_lao(builder: &mut TableBuilder)
{
    let thai = (0x0E01 ..= 0x0E2F).chain(0x0E30 ..= 0x0E3A).chain(0x0E40 ..= 0x0E46);
    let lao = (0x0E81 ..= 0x0EAE)
        .chain(0x0EB0 ..= 0x0EB9)
        .chain(0x0EBB ..= 0x0EBD)
        .chain(0x0EC0 ..= 0x0EC4)
        .chain(0x0EC6 ..= 0x0EC6);

    sequence(builder, &mut Primaries::new(Group::Thai, 2), thai);
    sequence(builder, &mut Primaries::new(Group::Lao, 2), lao);

    let first = FIRST_DIACRITIC + 2 * DIACRITICS.len() as u8;
    let tones = (0x0E47 ..= 0x0E4E).chain(0x0EC8 ..= 0x0ECD);

    for (index, code) in tones.enumerate() {
        builder.map(code, &[diacritic(first + 2 * index as u8)]);
    }
}

/// кана: хирагана и катакана с общими первичными весами, различаются третичным весом
fn kana(builder: &mut TableBuilder)
{
    let mut primaries = Primaries::new(Group::Kana, 4);

    for letters in KANA {
        let primary = primaries.take();
        let mut chars = letters.chars().map(u32::from);

        if let Some(big) = chars.next() {
            builder
                .map(big, &[lower(primary, 0x05)])
                .map(big + KATAKANA_SHIFT, &[lower(primary, 0x08)]);
        }

        if let Some(small) = chars.next() {
            builder
                .map(small, &[lower(primary, 0x04)])
                .map(small + KATAKANA_SHIFT, &[lower(primary, 0x07)]);
        }
    }

    // знак долготы, знаки повтора, лигатуры より / コト
    let prolonged = primaries.take();
    builder.map(0x30FC, &[lower(prolonged, COMMON_WEIGHT)]);

    let iteration = primaries.take();
    builder
        .map(0x309D, &[lower(iteration, 0x05)])
        .map(0x30FD, &[lower(iteration, 0x08)]);

    let ligature = primaries.take();
    builder
        .map(0x309F, &[lower(ligature, 0x05)])
        .map(0x30FF, &[lower(ligature, 0x08)]);

    builder.hiragana(0x3041 ..= 0x3096).hiragana(0x309D ..= 0x309F);
}

/// чамо: начальные, гласные, конечные
fn hangul_jamo(builder: &mut TableBuilder)
{
    let jamo = (0x1100 ..= 0x1112).chain(0x1161 ..= 0x1175).chain(0x11A8 ..= 0x11C2);

    sequence(builder, &mut Primaries::new(Group::Hangul, 2), jamo);
}
