// рабочие буферы сопоставителя: переиспользуются между вызовами, после каждого вызова очищаются

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

use crate::elements::Element;

/// шаг роста буферов
const GROWTH_STEP: usize = 256;
/// буферы, выросшие больше этого размера, после вызова освобождаются
const RETAINED_CAPACITY: usize = 64 * 1024;

/// буферы итератора элементов одной строки
#[derive(Debug, Default)]
pub struct IterBuffers
{
    /// кодпоинты, возвращенные в итератор
    pub pending: VecDeque<u32>,
    /// вычисленные, но еще не прочитанные элементы
    pub ces: VecDeque<Element>,
    pub work: Work,
}

/// промежуточные данные поиска сокращений и числовых последовательностей
#[derive(Debug, Default)]
pub struct Work
{
    /// совпавшие при поиске сокращения кодпоинты
    pub matched: Vec<u32>,
    /// пропущенные при поиске разрывного сокращения
    pub skipped: Vec<u32>,
    /// цифры числа
    pub digits: Vec<u8>,
}

/// тексты в UTF-16
#[derive(Debug, Default)]
pub struct TextBuffers
{
    pub left: Vec<u16>,
    pub right: Vec<u16>,
}

/// буферы сравнения и построения ключа
#[derive(Debug, Default)]
pub struct WorkBuffers
{
    pub left: IterBuffers,
    pub right: IterBuffers,
    /// веса уровня (французская сортировка)
    pub left_weights: Vec<u32>,
    pub right_weights: Vec<u32>,
    /// NFD-формы текстов для сравнения по кодпоинтам
    pub left_codes: Vec<u32>,
    pub right_codes: Vec<u32>,
    /// уровни ключа, кроме первичного
    pub levels: [Vec<u8>; 4],
}

/// все буферы сопоставителя
#[derive(Debug, Default)]
pub struct Scratch
{
    pub text: TextBuffers,
    pub work: WorkBuffers,
}

impl Scratch
{
    /// очистить буферы; слишком большие - освободить
    pub fn reset(&mut self)
    {
        let work = &mut self.work;

        for buffers in [&mut work.left, &mut work.right] {
            reset_deque(&mut buffers.pending);
            reset_deque(&mut buffers.ces);
            reset_vec(&mut buffers.work.matched);
            reset_vec(&mut buffers.work.skipped);
            reset_vec(&mut buffers.work.digits);
        }

        reset_vec(&mut self.text.left);
        reset_vec(&mut self.text.right);
        reset_vec(&mut work.left_weights);
        reset_vec(&mut work.right_weights);
        reset_vec(&mut work.left_codes);
        reset_vec(&mut work.right_codes);

        for level in work.levels.iter_mut() {
            reset_vec(level);
        }
    }
}

fn reset_vec<T>(buffer: &mut Vec<T>)
{
    buffer.clear();

    if buffer.capacity() > RETAINED_CAPACITY {
        buffer.shrink_to(GROWTH_STEP);
    }
}

fn reset_deque<T>(buffer: &mut VecDeque<T>)
{
    buffer.clear();

    if buffer.capacity() > RETAINED_CAPACITY {
        buffer.shrink_to(GROWTH_STEP);
    }
}

/// увеличить емкость буфера шагами фиксированного размера, чтобы поместилось ещё additional
#[inline]
pub fn reserve_stepped<T>(buffer: &mut Vec<T>, additional: usize)
{
    let required = buffer.len() + additional;

    if required > buffer.capacity() {
        let target = required.div_ceil(GROWTH_STEP) * GROWTH_STEP;
        buffer.reserve_exact(target - buffer.len());
    }
}

/// перекодировать строку в UTF-16
pub fn fill_units(text: &str, units: &mut Vec<u16>)
{
    units.clear();
    reserve_stepped(units, text.len());
    units.extend(text.encode_utf16());
}

/// доступ к буферам на время одного вызова: при освобождении буферы очищаются
pub struct ScratchGuard<G>
where
    G: DerefMut<Target = Scratch>,
{
    guard: G,
}

impl<G> ScratchGuard<G>
where
    G: DerefMut<Target = Scratch>,
{
    pub fn new(guard: G) -> Self
    {
        Self { guard }
    }
}

impl<G> Deref for ScratchGuard<G>
where
    G: DerefMut<Target = Scratch>,
{
    type Target = Scratch;

    fn deref(&self) -> &Scratch
    {
        &self.guard
    }
}

impl<G> DerefMut for ScratchGuard<G>
where
    G: DerefMut<Target = Scratch>,
{
    fn deref_mut(&mut self) -> &mut Scratch
    {
        &mut self.guard
    }
}

impl<G> Drop for ScratchGuard<G>
where
    G: DerefMut<Target = Scratch>,
{
    fn drop(&mut self)
    {
        self.guard.reset();
    }
}
