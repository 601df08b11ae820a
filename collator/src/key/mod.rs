// построение ключа сортировки
//
// уровни записываются в порядке сравнения и разделяются байтом 01, ключ завершается байтом 00.
// побайтовое сравнение ключей дает тот же результат, что и сравнение строк

use core::fmt;

use crate::buffers::{reserve_stepped, WorkBuffers};
use crate::elements::Elements;
use crate::options::Settings;
use crate::table::WeightTable;
use crate::weights::levels::{flagged_secondary, reverse_french, Classifier, Level, Quaternary, TertiaryMode, Weigher};
use crate::weights::{KEY_TERMINATOR, LEVEL_SEPARATOR};

use compress::{LevelWriter, PrimaryWriter};

mod compress;
mod identical;

/// записать ключ сортировки текста в конец out
pub fn write_key(table: &WeightTable, settings: &Settings, units: &[u16], work: &mut WorkBuffers, out: &mut Vec<u8>)
{
    let weigher = Weigher::new(settings, table.constants());
    let constants = weigher.constants();
    let reordering = settings.reordering();

    let WorkBuffers {
        left,
        left_weights,
        levels,
        ..
    } = work;

    let [secondaries, cases, tertiaries, quaternaries] = levels;

    let tertiary_compression = match weigher.tertiary_mode {
        TertiaryMode::Plain => constants.tertiary,
        TertiaryMode::LowerFirst => constants.tertiary_lower_first,
        TertiaryMode::UpperFirst => constants.tertiary_upper_first,
    };

    let mut primary = PrimaryWriter::new(constants);
    let mut secondary = LevelWriter::new(constants.secondary, secondaries);
    let mut case = LevelWriter::new(constants.case, cases);
    let mut tertiary = LevelWriter::new(tertiary_compression, tertiaries);
    let mut quaternary = LevelWriter::new(constants.quaternary, quaternaries);
    let shifted_limit = constants.quaternary_shifted_limit();

    let mut classifier = Classifier::new(settings);
    left_weights.clear();
    reserve_stepped(out, units.len() * 2);

    for element in Elements::new(table, settings, units, left) {
        let ce = element.ce;
        let kind = classifier.classify(ce);

        if let Some(p) = weigher.primary(kind, ce) {
            let lead = match reordering {
                Some(reordering) => reordering.revert(ce.lead_byte()),
                None => ce.lead_byte(),
            };

            primary.push(p, !ce.is_continuation() && table.is_compressible(lead), out);
        }

        if weigher.secondary {
            if let Some(s) = weigher.secondary(kind, ce) {
                match weigher.french {
                    true => left_weights.push(flagged_secondary(s, ce)),
                    false => secondary.push(s),
                }
            }
        }

        if weigher.case_level {
            if let Some(c) = weigher.case(kind, ce) {
                case.push(c);
            }
        }

        if weigher.tertiary {
            if let Some(t) = weigher.tertiary_weight(kind, ce) {
                tertiary.push(t);
            }
        }

        if weigher.quaternary {
            match weigher.quaternary_weight(kind, element) {
                None => (),
                Some(Quaternary::Common) => quaternary.push(constants.quaternary.low),
                Some(Quaternary::Byte(byte)) => quaternary.push(byte),
                Some(Quaternary::Shifted(p)) => {
                    let [lead, second] = p.to_be_bytes();

                    // старший байт не должен попасть в диапазон сжатия общих весов
                    match lead >= shifted_limit {
                        true => quaternary.push_below(&[shifted_limit, lead, second]),
                        false => quaternary.push_below(&[lead, second]),
                    }
                }
            }
        }
    }

    if weigher.french {
        reverse_french(left_weights);

        for &weight in left_weights.iter() {
            secondary.push(weight as u8);
        }
    }

    secondary.finish();
    case.finish();
    tertiary.finish();
    quaternary.finish();

    for level in weigher.levels() {
        let bytes = match level {
            Level::Primary => continue,
            Level::Secondary => &*secondaries,
            Level::Case => &*cases,
            Level::Tertiary => &*tertiaries,
            Level::Quaternary => &*quaternaries,
        };

        out.push(LEVEL_SEPARATOR);
        out.extend_from_slice(bytes);
    }

    if weigher.identical {
        out.push(LEVEL_SEPARATOR);
        identical::write_identical(units, out);
    }

    out.push(KEY_TERMINATOR);
}

/// ключ сортировки: сравнивается побайтово
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortKey(Vec<u8>);

impl SortKey
{
    pub fn as_bytes(&self) -> &[u8]
    {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8>
    {
        self.0
    }

    pub fn len(&self) -> usize
    {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SortKey
{
    fn from(bytes: Vec<u8>) -> Self
    {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SortKey
{
    fn as_ref(&self) -> &[u8]
    {
        &self.0
    }
}

/// байты в шестнадцатеричном виде, уровни разделены " | "
impl fmt::Display for SortKey
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let bytes = match self.0.split_last() {
            Some((&KEY_TERMINATOR, rest)) => rest,
            _ => &self.0,
        };

        for (index, level) in bytes.split(|&byte| byte == LEVEL_SEPARATOR).enumerate() {
            if index > 0 {
                f.write_str(" |")?;
            }

            for (position, byte) in level.iter().enumerate() {
                match index == 0 && position == 0 {
                    true => write!(f, "{:02X}", byte)?,
                    false => write!(f, " {:02X}", byte)?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::collation_element::{Case, Ce};
    use crate::compare::compare;
    use crate::options::{AlternateHandling, Strength};
    use crate::table::TableBuilder;
    use crate::weights::COMMON_WEIGHT;

    fn table() -> WeightTable
    {
        let mut builder = TableBuilder::new();

        builder
            .map(0x20, &[Ce::new(0x0304, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)])
            .map(0x61, &[Ce::new(0x2004, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)])
            .map(0x41, &[Ce::new(0x2004, COMMON_WEIGHT, Case::Upper, 0x0B)])
            .map(0x62, &[Ce::new(0x2008, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)])
            .map(0x3B1, &[Ce::new(0x3004, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)])
            .map(0x3B2, &[Ce::new(0x3008, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)])
            .map(0x301, &[Ce::new(0, 0x50, Case::Lower, COMMON_WEIGHT)]);

        builder.build().unwrap()
    }

    fn key(table: &WeightTable, settings: &Settings, text: &str) -> Vec<u8>
    {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut out = vec![];

        write_key(table, settings, &units, &mut WorkBuffers::default(), &mut out);
        out
    }

    #[test]
    fn levels_and_compression()
    {
        let table = table();
        let settings = table.defaults();

        assert_eq!(key(&table, &settings, "ab"), vec![0x20, 0x04, 0x20, 0x08, 0x01, 0x06, 0x01, 0x06, 0x00]);
        assert_eq!(key(&table, &settings, "αβ"), vec![0x30, 0x04, 0x08, 0x01, 0x06, 0x01, 0x06, 0x00]);
        assert_eq!(key(&table, &settings, "A\u{301}"), vec![0x20, 0x04, 0x01, 0x45, 0x50, 0x01, 0xCB, 0x05, 0x00]);
        assert_eq!(key(&table, &settings, ""), vec![0x01, 0x01, 0x00]);
    }

    #[test]
    fn shifted_quaternary()
    {
        let table = table();
        let mut settings = (*table.defaults()).clone();
        settings.alternate = AlternateHandling::Shifted;
        settings.strength = Strength::Quaternary;
        settings.refresh(&table).unwrap();

        // пробел уходит на 4-й уровень
        assert_eq!(key(&table, &settings, "a b"), vec![
            0x20, 0x04, 0x20, 0x08, 0x01, 0x06, 0x01, 0x06, 0x01, 0x1C, 0x03, 0x04, 0x1C, 0x00
        ]);
    }

    #[test]
    fn keys_agree_with_compare()
    {
        let table = table();
        let mut settings = (*table.defaults()).clone();
        let texts = ["", "a", "A", "ab", "a b", "á", "Ab", "b", "α", "αβ", "β", "a\u{FFFE}b", " "];

        for (strength, alternate, french) in [
            (Strength::Tertiary, AlternateHandling::NonIgnorable, false),
            (Strength::Quaternary, AlternateHandling::Shifted, false),
            (Strength::Identical, AlternateHandling::Shifted, true),
        ] {
            settings.strength = strength;
            settings.alternate = alternate;
            settings.french = french;
            settings.refresh(&table).unwrap();

            for left in texts {
                for right in texts {
                    let l: Vec<u16> = left.encode_utf16().collect();
                    let r: Vec<u16> = right.encode_utf16().collect();
                    let ordering = compare(&table, &settings, &l, &r, &mut WorkBuffers::default());

                    assert_eq!(
                        key(&table, &settings, left).cmp(&key(&table, &settings, right)),
                        ordering,
                        "{:?} vs {:?} at {:?}",
                        left,
                        right,
                        strength
                    );
                }
            }
        }
    }

    #[test]
    fn display()
    {
        let key = SortKey::from(vec![0x20, 0x04, 0x01, 0x06, 0x01, 0x06, 0x00]);

        assert_eq!(key.to_string(), "20 04 | 06 | 06");
    }
}
