// сравнение по кодпоинтам NFD-формы: последний уровень при строгости Identical
//
// конец строки меньше U+FFFE (разделитель слияния), U+FFFE меньше любого кодпоинта

use core::cmp::Ordering;

use crate::codepoint::{decomposition, for_each_nfd, is_fcd, Decomposition};

/// ранг кодпоинта при сравнении
#[inline]
fn rank(code: u32) -> i64
{
    match code {
        0xFFFE => -1,
        _ => code as i64,
    }
}

/// кодпоинты текста; одиночные суррогаты - как есть
fn codes(units: &[u16]) -> impl Iterator<Item = u32> + '_
{
    char::decode_utf16(units.iter().copied())
        .map(|decoded| decoded.map_or_else(|error| error.unpaired_surrogate() as u32, |c| c as u32))
}

/// кодпоинты NFD-формы текста в FCD: конкатенация полных декомпозиций
fn decomposed(units: &[u16]) -> impl Iterator<Item = u32> + '_
{
    codes(units).flat_map(|code| decomposition(code).unwrap_or_else(|| smallvec::smallvec![code]))
}

/// передать кодпоинты NFD-формы текста
pub fn for_each_nfd_code<F>(units: &[u16], mut f: F)
where
    F: FnMut(u32),
{
    match is_fcd(units) {
        true => decomposed(units).for_each(f),
        false => for_each_nfd(units, &mut f),
    }
}

/// текущий кодпоинт курсора
enum Head
{
    /// кодпоинт текста, еще не разложенный
    Text(u32),
    /// кодпоинт полной декомпозиции
    Decomposed(Decomposition, usize),
    End,
}

/// кодпоинты NFD-формы текста в FCD; кодпоинт раскладывается только по запросу
struct Cursor<I>
{
    codes: I,
    head: Head,
}

impl<I> Cursor<I>
where
    I: Iterator<Item = u32>,
{
    fn new(codes: I) -> Self
    {
        let mut cursor = Self { codes, head: Head::End };
        cursor.read();

        cursor
    }

    fn read(&mut self)
    {
        self.head = match self.codes.next() {
            Some(code) => Head::Text(code),
            None => Head::End,
        };
    }

    fn current(&self) -> Option<u32>
    {
        match &self.head {
            Head::Text(code) => Some(*code),
            Head::Decomposed(codes, index) => Some(codes[*index]),
            Head::End => None,
        }
    }

    fn advance(&mut self)
    {
        if let Head::Decomposed(codes, index) = &mut self.head {
            *index += 1;

            if *index < codes.len() {
                return;
            }
        }

        self.read();
    }

    /// разложить текущий кодпоинт текста; false, если он уже разложен или не раскладывается
    fn decompose(&mut self) -> bool
    {
        let Head::Text(code) = self.head else {
            return false;
        };

        match decomposition(code) {
            Some(codes) => {
                self.head = Head::Decomposed(codes, 0);
                true
            }
            None => false,
        }
    }
}

/// сравнить тексты в FCD: совпадающие кодпоинты пропускаются без разложения
fn compare_fcd(left: &[u16], right: &[u16]) -> Ordering
{
    let mut left = Cursor::new(codes(left));
    let mut right = Cursor::new(codes(right));

    loop {
        match (left.current(), right.current()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l == r => {
                left.advance();
                right.advance();
            }
            (Some(l), Some(r)) => {
                // обе стороны раскладываются, даже если разложилась первая
                let left_decomposed = left.decompose();
                let right_decomposed = right.decompose();

                if !left_decomposed && !right_decomposed {
                    return rank(l).cmp(&rank(r));
                }
            }
        }
    }
}

/// сравнить NFD-формы; текст не в FCD предварительно нормализуется в буферы
pub fn compare(left: &[u16], right: &[u16], left_codes: &mut Vec<u32>, right_codes: &mut Vec<u32>) -> Ordering
{
    if is_fcd(left) && is_fcd(right) {
        return compare_fcd(left, right);
    }

    left_codes.clear();
    right_codes.clear();

    for_each_nfd(left, |code| left_codes.push(code));
    for_each_nfd(right, |code| right_codes.push(code));

    left_codes
        .iter()
        .map(|&code| rank(code))
        .cmp(right_codes.iter().map(|&code| rank(code)))
}
