//! сопоставление строк по алгоритму UCA (UTS #10) с настройками UTS #35
//!
//! таблица весов ([`WeightTable`]) неизменяема и разделяется между сопоставителями.
//! [`Collator`] - изменяемый сопоставитель для одного владельца, [`FrozenCollator`] - замороженный,
//! для одновременного использования из нескольких потоков

use core::cmp::Ordering;
use std::borrow::Cow;
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::ops::DerefMut;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use buffers::{fill_units, Scratch, ScratchGuard};
use elements::Elements;

mod buffers;
mod codepoint;
mod collation_element;
mod compare;
mod data;
mod elements;
mod error;
mod hangul;
mod implicit;
mod key;
mod options;
mod table;
mod trie;
mod weights;

pub use collation_element::{Case, Ce};
pub use data::root;
pub use elements::CollationElements;
pub use error::{ConfigError, TableError};
pub use key::SortKey;
pub use options::{AlternateHandling, CaseFirst, Settings, Strength};
pub use table::{Group, TableBuilder, WeightTable, MERGE_SEPARATOR_CE};
pub use weights::{Compression, KeyConstants, Weights};

/// таблица и настройки: общая часть изменяемого и замороженного сопоставителей
#[derive(Debug, Clone)]
struct Engine
{
    table: Arc<WeightTable>,
    settings: Arc<Settings>,
}

impl Engine
{
    fn compare(&self, scratch: &mut Scratch, left: &str, right: &str) -> Ordering
    {
        let Scratch { text, work } = scratch;

        fill_units(left, &mut text.left);
        fill_units(right, &mut text.right);

        compare::compare(&self.table, &self.settings, &text.left, &text.right, work)
    }

    fn compare_utf16(&self, scratch: &mut Scratch, left: &[u16], right: &[u16]) -> Ordering
    {
        compare::compare(&self.table, &self.settings, left, right, &mut scratch.work)
    }

    fn write_key(&self, scratch: &mut Scratch, text: &str, out: &mut Vec<u8>)
    {
        let Scratch { text: units, work } = scratch;

        fill_units(text, &mut units.left);
        key::write_key(&self.table, &self.settings, &units.left, work, out);
    }

    fn write_key_utf16(&self, scratch: &mut Scratch, units: &[u16], out: &mut Vec<u8>)
    {
        key::write_key(&self.table, &self.settings, units, &mut scratch.work, out);
    }

    fn elements(&self, scratch: &mut Scratch, text: &str) -> Vec<Weights>
    {
        let Scratch { text: units, work } = scratch;
        let variable_top = self.settings.variable_top();

        fill_units(text, &mut units.left);

        Elements::new(&self.table, &self.settings, &units.left, &mut work.left)
            .map(|element| Weights::new(element.ce, variable_top))
            .collect()
    }
}

// таблицы сравниваются по адресу: одинаковое содержимое разных таблиц не делает сопоставители равными
impl PartialEq for Engine
{
    fn eq(&self, other: &Self) -> bool
    {
        Arc::ptr_eq(&self.table, &other.table) && self.settings == other.settings
    }
}

impl Eq for Engine {}

impl Hash for Engine
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        Arc::as_ptr(&self.table).hash(state);
        self.settings.hash(state);
    }
}

/// операции сравнения поверх буферов, полученных способом конкретного сопоставителя
macro_rules! collation_operations {
    () => {
        /// сравнить строки
        pub fn compare(&self, left: &str, right: &str) -> Ordering
        {
            self.engine.compare(&mut self.scratch(), left, right)
        }

        /// сравнить строки UTF-16; одиночные суррогаты допускаются
        pub fn compare_utf16(&self, left: &[u16], right: &[u16]) -> Ordering
        {
            self.engine.compare_utf16(&mut self.scratch(), left, right)
        }

        /// ключ сортировки строки
        pub fn sort_key(&self, text: &str) -> SortKey
        {
            let mut out = vec![];
            self.engine.write_key(&mut self.scratch(), text, &mut out);

            SortKey::from(out)
        }

        /// ключ сортировки строки UTF-16
        pub fn sort_key_utf16(&self, units: &[u16]) -> SortKey
        {
            let mut out = vec![];
            self.engine.write_key_utf16(&mut self.scratch(), units, &mut out);

            SortKey::from(out)
        }

        /// записать ключ сортировки в буфер (предыдущее содержимое удаляется)
        pub fn sort_key_into(&self, text: &str, out: &mut Vec<u8>)
        {
            out.clear();
            self.engine.write_key(&mut self.scratch(), text, out);
        }

        /// элементы сопоставления строки в виде весов
        pub fn elements(&self, text: &str) -> Vec<Weights>
        {
            self.engine.elements(&mut self.scratch(), text)
        }

        /// элементы строки, начиная со смещения в единицах UTF-16; смещение внутри сокращения
        /// или числа сдвигается назад к ближайшей безопасной границе
        pub fn elements_from<'t>(&'t self, text: &str, offset: usize) -> CollationElements<'t>
        {
            let units = Cow::Owned(text.encode_utf16().collect());

            CollationElements::new(&self.engine.table, &self.engine.settings, units, offset)
        }

        pub fn elements_from_utf16<'t>(&'t self, units: &'t [u16], offset: usize) -> CollationElements<'t>
        {
            CollationElements::new(&self.engine.table, &self.engine.settings, Cow::Borrowed(units), offset)
        }

        pub fn equals(&self, left: &str, right: &str) -> bool
        {
            self.compare(left, right) == Ordering::Equal
        }

        pub fn greater(&self, left: &str, right: &str) -> bool
        {
            self.compare(left, right) == Ordering::Greater
        }

        pub fn greater_or_equal(&self, left: &str, right: &str) -> bool
        {
            self.compare(left, right) != Ordering::Less
        }

        pub fn settings(&self) -> &Settings
        {
            &self.engine.settings
        }

        pub fn table(&self) -> &Arc<WeightTable>
        {
            &self.engine.table
        }
    };
}

/// сопоставитель с изменяемыми настройками; не разделяется между потоками
#[derive(Debug)]
pub struct Collator
{
    engine: Engine,
    scratch: RefCell<Scratch>,
}

impl Clone for Collator
{
    fn clone(&self) -> Self
    {
        Self::from_engine(self.engine.clone())
    }
}

/// равны сопоставители одной таблицы с одинаковыми настройками
impl PartialEq for Collator
{
    fn eq(&self, other: &Self) -> bool
    {
        self.engine == other.engine
    }
}

impl Eq for Collator {}

impl Hash for Collator
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.engine.hash(state);
    }
}

impl Collator
{
    /// сопоставитель корневой таблицы с настройками по умолчанию
    pub fn root() -> Result<Self, TableError>
    {
        Ok(Self::new(data::root()?))
    }

    /// сопоставитель с настройками по умолчанию таблицы
    pub fn new(table: Arc<WeightTable>) -> Self
    {
        let settings = table.defaults();

        Self::from_engine(Engine { table, settings })
    }

    /// сопоставитель с заданными настройками
    pub fn with_settings(table: Arc<WeightTable>, mut settings: Settings) -> Result<Self, ConfigError>
    {
        settings.refresh(&table)?;

        Ok(Self::from_engine(Engine {
            table,
            settings: Arc::new(settings),
        }))
    }

    fn from_engine(engine: Engine) -> Self
    {
        Self {
            engine,
            scratch: RefCell::new(Scratch::default()),
        }
    }

    fn scratch(&self) -> ScratchGuard<impl DerefMut<Target = Scratch> + '_>
    {
        ScratchGuard::new(self.scratch.borrow_mut())
    }

    collation_operations!();

    /// изменить настройки: изменения проверяются на копии, при ошибке настройки не меняются.
    /// пока настройки не отличаются от умолчаний, они разделяются с таблицей
    fn update<F>(&mut self, change: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Settings) -> Result<(), ConfigError>,
    {
        let mut candidate = (*self.engine.settings).clone();

        change(&mut candidate)?;
        candidate.refresh(&self.engine.table)?;

        if candidate != *self.engine.settings {
            debug!(settings = ?candidate, "collator settings changed");
            *Arc::make_mut(&mut self.engine.settings) = candidate;
        }

        Ok(())
    }

    pub fn set_strength(&mut self, strength: Strength)
    {
        self.update_infallible(|settings| settings.strength = strength);
    }

    /// уровень сравнения числом 1..=5
    pub fn set_strength_level(&mut self, level: u8) -> Result<(), ConfigError>
    {
        let strength = Strength::try_from(level)?;

        self.update(|settings| {
            settings.strength = strength;
            Ok(())
        })
    }

    pub fn set_case_level(&mut self, case_level: bool)
    {
        self.update_infallible(|settings| settings.case_level = case_level);
    }

    /// сравнение вторичных весов с конца строки
    pub fn set_french(&mut self, french: bool)
    {
        self.update_infallible(|settings| settings.french = french);
    }

    pub fn set_alternate(&mut self, alternate: AlternateHandling)
    {
        self.update_infallible(|settings| settings.alternate = alternate);
    }

    /// последняя группа, веса которой считаются переменными
    pub fn set_max_variable(&mut self, group: Group) -> Result<(), ConfigError>
    {
        self.update(|settings| {
            settings.max_variable = group;
            Ok(())
        })
    }

    /// граница переменных весов по первичному весу: выбирается группа, в которую он попадает
    pub fn set_variable_top(&mut self, primary: u16) -> Result<(), ConfigError>
    {
        let group = Settings::variable_group_of(&self.engine.table, primary)?;

        self.set_max_variable(group)
    }

    pub fn set_case_first(&mut self, case_first: CaseFirst)
    {
        self.update_infallible(|settings| settings.case_first = case_first);
    }

    /// сравнение последовательностей цифр по числовому значению
    pub fn set_numeric(&mut self, numeric: bool)
    {
        self.update_infallible(|settings| settings.numeric = numeric);
    }

    /// отдельный вес хираганы на 4-м уровне
    pub fn set_hiragana_quaternary(&mut self, hiragana: bool)
    {
        self.update_infallible(|settings| settings.hiragana_quaternary = hiragana);
    }

    /// перестановка групп
    pub fn set_reorder_codes(&mut self, codes: &[Group]) -> Result<(), ConfigError>
    {
        self.update(|settings| {
            settings.reorder_codes = codes.to_vec();
            Ok(())
        })
    }

    /// применить ключевые слова UTS #35, например "ks-level2-kn-true"
    pub fn apply_keywords(&mut self, keywords: &str) -> Result<(), ConfigError>
    {
        self.update(|settings| options::apply_keywords(settings, keywords))
    }

    /// вернуть настройки по умолчанию таблицы
    pub fn reset_settings(&mut self)
    {
        self.engine.settings = self.engine.table.defaults();
        debug!("collator settings reset to defaults");
    }

    /// вернуть одну настройку к значению по умолчанию таблицы
    fn restore_default<F>(&mut self, restore: F)
    where
        F: FnOnce(&mut Settings, &Settings),
    {
        let defaults = self.engine.table.defaults();

        self.update_infallible(|settings| restore(settings, &defaults));
    }

    pub fn set_strength_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.strength = defaults.strength);
    }

    pub fn set_case_level_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.case_level = defaults.case_level);
    }

    pub fn set_french_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.french = defaults.french);
    }

    pub fn set_alternate_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.alternate = defaults.alternate);
    }

    /// также возвращает границу переменных весов, заданную через set_variable_top
    pub fn set_max_variable_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.max_variable = defaults.max_variable);
    }

    pub fn set_case_first_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.case_first = defaults.case_first);
    }

    pub fn set_numeric_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.numeric = defaults.numeric);
    }

    pub fn set_hiragana_quaternary_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.hiragana_quaternary = defaults.hiragana_quaternary);
    }

    pub fn set_reorder_codes_default(&mut self)
    {
        self.restore_default(|settings, defaults| settings.reorder_codes = defaults.reorder_codes.clone());
    }

    fn update_infallible<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Settings),
    {
        // проверка при обновлении касается только групп, которые здесь не меняются
        if let Err(error) = self.update(|settings| {
            change(settings);
            Ok(())
        }) {
            debug!(%error, "settings change rejected");
        }
    }

    /// заморозить: настройки больше не меняются, сопоставитель можно разделять между потоками
    pub fn freeze(self) -> FrozenCollator
    {
        debug!(settings = ?self.engine.settings, "collator frozen");

        FrozenCollator {
            engine: self.engine,
            scratch: Mutex::new(Scratch::default()),
        }
    }
}

/// замороженный сопоставитель: неизменяемые настройки, общие буферы под блокировкой
#[derive(Debug)]
pub struct FrozenCollator
{
    engine: Engine,
    scratch: Mutex<Scratch>,
}

impl PartialEq for FrozenCollator
{
    fn eq(&self, other: &Self) -> bool
    {
        self.engine == other.engine
    }
}

impl Eq for FrozenCollator {}

impl Hash for FrozenCollator
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.engine.hash(state);
    }
}

impl FrozenCollator
{
    fn scratch(&self) -> ScratchGuard<impl DerefMut<Target = Scratch> + '_>
    {
        ScratchGuard::new(self.scratch.lock())
    }

    collation_operations!();

    /// изменяемая копия с теми же настройками
    pub fn thaw(&self) -> Collator
    {
        debug!("collator thawed");

        Collator::from_engine(self.engine.clone())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn collator() -> Collator
    {
        Collator::root().unwrap()
    }

    #[test]
    fn basic_order()
    {
        let collator = collator();

        assert_eq!(collator.compare("a", "b"), Ordering::Less);
        assert_eq!(collator.compare("b", "A"), Ordering::Greater);
        assert_eq!(collator.compare("a", "A"), Ordering::Less);
        assert_eq!(collator.compare("\u{E9}", "e\u{301}"), Ordering::Equal);
        assert!(collator.greater_or_equal("b", "b"));
        assert!(collator.greater("c", "b"));
        assert!(collator.equals("", "\u{200B}"));
    }

    #[test]
    fn settings_are_shared_until_changed()
    {
        let mut collator = collator();
        let defaults = collator.table().defaults();

        assert!(Arc::ptr_eq(&collator.engine.settings, &defaults));

        // изменение на то же значение ничего не копирует
        collator.set_strength(Strength::Tertiary);
        assert!(Arc::ptr_eq(&collator.engine.settings, &defaults));

        collator.set_strength(Strength::Primary);
        assert!(!Arc::ptr_eq(&collator.engine.settings, &defaults));
        assert_eq!(defaults.strength(), Strength::Tertiary);

        collator.reset_settings();
        assert_eq!(collator.settings().strength(), Strength::Tertiary);
    }

    #[test]
    fn rejected_settings_do_not_change()
    {
        let mut collator = collator();

        assert!(collator.set_strength_level(7).is_err());
        assert!(collator.set_max_variable(Group::Latin).is_err());
        assert!(collator.set_reorder_codes(&[Group::Punctuation]).is_err());
        assert!(collator.apply_keywords("ks-level2-kx-true").is_err());

        assert_eq!(collator.settings(), &*collator.table().defaults());
    }

    #[test]
    fn sort_key_matches_compare()
    {
        let collator = collator();
        let texts = ["", "a", "A", "ab", "a b", "\u{E1}", "b", "\u{3B1}", "\u{4E00}", "1"];

        for left in texts {
            for right in texts {
                assert_eq!(
                    collator.sort_key(left).cmp(&collator.sort_key(right)),
                    collator.compare(left, right),
                    "{:?} vs {:?}",
                    left,
                    right
                );
            }
        }

        let mut out = vec![0xAA];
        collator.sort_key_into("ab", &mut out);
        assert_eq!(out, collator.sort_key("ab").into_bytes());
    }

    #[test]
    fn freeze_and_thaw()
    {
        let mut collator = collator();
        collator.set_strength(Strength::Secondary);

        let frozen = collator.freeze();
        assert_eq!(frozen.compare("a", "A"), Ordering::Equal);

        let mut thawed = frozen.thaw();
        thawed.set_strength(Strength::Tertiary);

        assert_eq!(thawed.compare("a", "A"), Ordering::Less);
        assert_eq!(frozen.compare("a", "A"), Ordering::Equal);
    }

    #[test]
    fn elements_are_exposed()
    {
        let collator = collator();
        let elements = collator.elements("a ");

        assert_eq!(elements.len(), 2);
        assert!(!elements[0].is_variable);
        assert!(elements[1].is_variable);
    }

    #[test]
    fn single_settings_restore_defaults()
    {
        let mut collator = collator();
        let defaults = collator.table().defaults();

        collator.set_strength(Strength::Primary);
        collator.set_numeric(true);
        collator.set_alternate(AlternateHandling::Shifted);
        collator.set_reorder_codes(&[Group::Greek]).unwrap();

        collator.set_strength_default();
        assert_eq!(collator.settings().strength(), defaults.strength());
        assert!(collator.settings().numeric());

        collator.set_numeric_default();
        collator.set_alternate_default();
        assert_eq!(collator.settings().alternate(), defaults.alternate());
        assert_eq!(collator.settings().reorder_codes(), &[Group::Greek]);

        collator.set_reorder_codes_default();
        assert_eq!(collator.settings(), &*defaults);

        collator.set_variable_top(0x0305).unwrap();
        collator.set_max_variable_default();
        collator.set_case_first(CaseFirst::Upper);
        collator.set_case_first_default();
        collator.set_case_level(true);
        collator.set_case_level_default();
        collator.set_french(true);
        collator.set_french_default();
        collator.set_hiragana_quaternary(true);
        collator.set_hiragana_quaternary_default();
        assert_eq!(collator.settings(), &*defaults);
    }

    #[test]
    fn equality_and_hash()
    {
        use std::collections::HashSet;

        let table = collator().table().clone();
        let first = Collator::new(table.clone());
        let mut second = Collator::new(table.clone());

        assert_eq!(first, second);

        second.set_numeric(true);
        assert_ne!(first, second);

        second.set_numeric(false);
        assert_eq!(first, second);

        // та же таблица, собранная заново, - другой сопоставитель
        let rebuilt = Collator::new(Arc::new(TableBuilder::from_root().build().unwrap()));
        assert_ne!(first, rebuilt);

        let set: HashSet<Collator> = [first.clone(), second, rebuilt].into_iter().collect();
        assert_eq!(set.len(), 2);

        assert_eq!(first.clone().freeze(), first.freeze());
    }

    #[test]
    fn elements_from_offset()
    {
        let collator = collator();

        assert_eq!(collator.elements_from("ab c", 0).collect::<Vec<_>>(), collator.elements("ab c"));
        assert_eq!(collator.elements_from("ab c", 2).collect::<Vec<_>>(), collator.elements(" c"));

        let units: Vec<u16> = "xyz".encode_utf16().collect();
        let mut thawed = collator.freeze().thaw();
        thawed.set_numeric(true);
        assert_eq!(thawed.elements_from_utf16(&units, 1).count(), 2);
    }
}
