// веса отдельных уровней для элементов сопоставления
//
// общие для сравнения строк и для построения ключей: сравнение сопоставляет логические значения
// весов, ключ записывает те же значения с учетом сжатия общих весов. логические значения
// подобраны так, что их порядок совпадает с порядком байтов в ключе

use crate::collation_element::{Case, Ce};
use crate::elements::Element;
use crate::options::{CaseFirst, Settings, Strength};
use crate::table::{MERGE_SEPARATOR_LEAD, MERGE_SEPARATOR_PRIMARY};

use super::{KeyConstants, COMMON_WEIGHT, MERGE_SEPARATOR_WEIGHT};

/// признак продолжения в собранных вторичных весах
const CONTINUATION_FLAG: u32 = 1 << 16;

/// уровень сравнения (регистр - отдельный необязательный уровень между 2-м и 3-м)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level
{
    Primary,
    Secondary,
    Case,
    Tertiary,
    Quaternary,
}

/// как элемент участвует в сравнении при сдвиге переменных весов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind
{
    /// не участвует ни на одном уровне
    Ignorable,
    /// переменный вес: участвует только на 4-м уровне
    Shifted,
    /// обычный элемент
    Regular,
}

/// классификация элементов с учетом предыдущих (TR10, Variable Weighting)
#[derive(Debug, Clone, Copy)]
pub struct Classifier
{
    variable_top: u16,
    after_variable: bool,
}

impl Classifier
{
    pub fn new(settings: &Settings) -> Self
    {
        Self {
            variable_top: settings.shift_top(),
            after_variable: false,
        }
    }

    #[inline]
    pub fn classify(&mut self, ce: Ce) -> Kind
    {
        if ce.is_ignorable() {
            return Kind::Ignorable;
        }

        if self.variable_top == 0 {
            return Kind::Regular;
        }

        // продолжения и первично-игнорируемые элементы после переменного - игнорируются
        if ce.is_continuation() || ce.primary() == 0 {
            return match self.after_variable {
                true => Kind::Ignorable,
                false => Kind::Regular,
            };
        }

        self.after_variable =
            ce.lead_byte() > MERGE_SEPARATOR_LEAD && ce.primary() <= self.variable_top;

        match self.after_variable {
            true => Kind::Shifted,
            false => Kind::Regular,
        }
    }
}

/// третичный вес: без регистра, с регистром (строчные первыми / прописные первыми)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TertiaryMode
{
    Plain,
    LowerFirst,
    UpperFirst,
}

/// вес 4-го уровня
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quaternary
{
    /// общий вес - больше всех остальных
    Common,
    /// однобайтовый вес: разделитель слияния или хирагана
    Byte(u8),
    /// сдвинутый первичный вес
    Shifted(u16),
}

impl Quaternary
{
    /// значение для сравнения, согласованное с записью в ключ
    #[inline]
    pub fn value(self) -> u16
    {
        match self {
            Quaternary::Common => 0xFFFF,
            Quaternary::Byte(byte) => (byte as u16) << 8,
            Quaternary::Shifted(primary) => primary,
        }
    }
}

/// какие уровни участвуют в сравнении и как вычисляются их веса
#[derive(Debug, Clone, Copy)]
pub struct Weigher<'a>
{
    constants: &'a KeyConstants,
    pub strength: Strength,
    pub secondary: bool,
    pub case_level: bool,
    pub tertiary: bool,
    pub quaternary: bool,
    pub identical: bool,
    pub french: bool,
    pub upper_first_case: bool,
    pub tertiary_mode: TertiaryMode,
    pub hiragana: bool,
}

impl<'a> Weigher<'a>
{
    pub fn new(settings: &Settings, constants: &'a KeyConstants) -> Self
    {
        let strength = settings.strength();

        // регистр учитывается третичным весом, только если нет отдельного уровня регистра
        let tertiary_mode = match (settings.case_first(), settings.case_level()) {
            (CaseFirst::Off, _) | (_, true) => TertiaryMode::Plain,
            (CaseFirst::Lower, false) => TertiaryMode::LowerFirst,
            (CaseFirst::Upper, false) => TertiaryMode::UpperFirst,
        };

        Self {
            constants,
            strength,
            secondary: strength >= Strength::Secondary,
            case_level: settings.case_level(),
            tertiary: strength >= Strength::Tertiary,
            quaternary: settings.has_quaternary(),
            identical: strength == Strength::Identical,
            french: settings.french() && strength >= Strength::Secondary,
            upper_first_case: settings.case_first() == CaseFirst::Upper,
            tertiary_mode,
            hiragana: settings.hiragana_quaternary(),
        }
    }

    /// уровни, участвующие в сравнении, по порядку
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_
    {
        [
            (Level::Primary, true),
            (Level::Secondary, self.secondary),
            (Level::Case, self.case_level),
            (Level::Tertiary, self.tertiary),
            (Level::Quaternary, self.quaternary),
        ]
        .into_iter()
        .filter_map(|(level, active)| active.then_some(level))
    }

    pub fn constants(&self) -> &KeyConstants
    {
        self.constants
    }

    /// логическое значение веса уровня, None - элемент не участвует на этом уровне
    #[inline]
    pub fn weight(&self, level: Level, kind: Kind, element: Element) -> Option<u16>
    {
        match level {
            Level::Primary => self.primary(kind, element.ce),
            Level::Secondary => self.secondary(kind, element.ce).map(u16::from),
            Level::Case => self.case(kind, element.ce).map(u16::from),
            Level::Tertiary => self.tertiary_weight(kind, element.ce).map(u16::from),
            Level::Quaternary => self.quaternary_weight(kind, element).map(Quaternary::value),
        }
    }

    #[inline]
    pub fn primary(&self, kind: Kind, ce: Ce) -> Option<u16>
    {
        match kind == Kind::Regular && ce.primary() != 0 {
            true => Some(ce.primary()),
            false => None,
        }
    }

    #[inline]
    pub fn secondary(&self, kind: Kind, ce: Ce) -> Option<u8>
    {
        match kind == Kind::Regular && ce.secondary() != 0 {
            true => Some(ce.secondary()),
            false => None,
        }
    }

    /// вес уровня регистра; продолжения не участвуют, на первичном уровне игнорируются
    /// первично-игнорируемые элементы, на остальных - вторично-игнорируемые
    #[inline]
    pub fn case(&self, kind: Kind, ce: Ce) -> Option<u8>
    {
        if kind != Kind::Regular || ce.is_continuation() {
            return None;
        }

        let ignored = match self.strength {
            Strength::Primary => ce.primary() == 0,
            _ => ce.secondary() == 0,
        };

        if ignored {
            return None;
        }

        if ce.tertiary() <= MERGE_SEPARATOR_WEIGHT {
            return Some(MERGE_SEPARATOR_WEIGHT);
        }

        let constants = self.constants;

        Some(match (ce.case(), self.upper_first_case) {
            (Case::Lower, _) => constants.case.low,
            (Case::Mixed, false) => constants.case_mixed,
            (Case::Upper, false) => constants.case_upper,
            (Case::Mixed, true) => constants.case_upper_first_mixed,
            (Case::Upper, true) => constants.case_upper_first_upper,
        })
    }

    /// третичный вес; общий вес всегда равен нижней границе сжатия соответствующего режима
    #[inline]
    pub fn tertiary_weight(&self, kind: Kind, ce: Ce) -> Option<u8>
    {
        let t = ce.tertiary();

        if kind != Kind::Regular || t == 0 {
            return None;
        }

        // разделители не меняются
        if t <= MERGE_SEPARATOR_WEIGHT {
            return Some(t);
        }

        let case = match ce.is_continuation() {
            true => 0,
            false => ce.case() as u8,
        };

        let with_case = (case << 6) | t;

        Some(match self.tertiary_mode {
            // 06..3F -> C6..FF
            TertiaryMode::Plain => match t > COMMON_WEIGHT {
                true => t + (self.constants.tertiary.high - COMMON_WEIGHT),
                false => t,
            },
            // 06..BF -> 46..FF
            TertiaryMode::LowerFirst => match with_case > COMMON_WEIGHT {
                true => with_case + (self.constants.tertiary_lower_first.high - COMMON_WEIGHT),
                false => with_case,
            },
            // строчные 03..04 -> 83..84, общий -> 85, строчные 06..3F -> C6..FF,
            // смешанный 43..7F -> 43..7F, прописные 83..BF -> 03..3F
            TertiaryMode::UpperFirst => {
                let upper_first = &self.constants.tertiary_upper_first;

                if with_case == COMMON_WEIGHT {
                    upper_first.low
                } else if ce.secondary() != 0 {
                    let inverted = with_case ^ 0xC0;

                    match inverted < upper_first.high {
                        true => inverted - 0x40,
                        false => inverted,
                    }
                } else {
                    // третично-значимые элементы (0.0.t) - выше всех
                    0xC0 | t
                }
            }
        })
    }

    /// вес 4-го уровня
    #[inline]
    pub fn quaternary_weight(&self, kind: Kind, element: Element) -> Option<Quaternary>
    {
        let ce = element.ce;

        match kind {
            Kind::Ignorable => None,
            Kind::Shifted => Some(Quaternary::Shifted(ce.primary())),
            Kind::Regular => {
                if ce.secondary() == 0 && ce.tertiary() == 0 {
                    return None;
                }

                if ce.primary() == MERGE_SEPARATOR_PRIMARY {
                    return Some(Quaternary::Byte(MERGE_SEPARATOR_WEIGHT));
                }

                match self.hiragana && element.hiragana && !ce.is_continuation() {
                    true => Some(Quaternary::Byte(self.constants.hiragana_quaternary)),
                    false => Some(Quaternary::Common),
                }
            }
        }
    }
}

/// вторичный вес с признаком продолжения, для последующего разворота
#[inline]
pub fn flagged_secondary(weight: u8, ce: Ce) -> u32
{
    match ce.is_continuation() {
        true => weight as u32 | CONTINUATION_FLAG,
        false => weight as u32,
    }
}

/// собрать вторичные веса в порядке французской сортировки
pub fn french_secondaries<I>(weigher: &Weigher, classifier: &mut Classifier, elements: I, out: &mut Vec<u32>)
where
    I: Iterator<Item = Element>,
{
    out.clear();

    for element in elements {
        let kind = classifier.classify(element.ce);

        if let Some(weight) = weigher.secondary(kind, element.ce) {
            out.push(flagged_secondary(weight, element.ce));
        }
    }

    reverse_french(out);
}

/// развернуть помеченные вторичные веса: в пределах сегментов между разделителями слияния
/// элементы идут в обратном порядке, продолжения - после своего элемента. признаки снимаются
pub fn reverse_french(weights: &mut [u32])
{
    for segment in weights.split_mut(|&weight| weight == MERGE_SEPARATOR_WEIGHT as u32) {
        segment.reverse();

        // после разворота продолжения стоят перед своим элементом
        let mut start = 0;

        for index in 0 .. segment.len() {
            if segment[index] & CONTINUATION_FLAG == 0 {
                segment[start ..= index].reverse();
                start = index + 1;
            }
        }
    }

    for weight in weights.iter_mut() {
        *weight &= !CONTINUATION_FLAG;
    }
}
