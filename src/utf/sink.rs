/// An append-only target for encoded units.
///
/// Sinks are assumed to have room for everything written to them during a call.
pub trait Sink<U> {
    fn put(&mut self, unit: U);
}

impl<U> Sink<U> for Vec<U> {
    #[inline]
    fn put(&mut self, unit: U) {
        self.push(unit);
    }
}

impl<U, S: Sink<U> + ?Sized> Sink<U> for &mut S {
    #[inline]
    fn put(&mut self, unit: U) {
        (**self).put(unit);
    }
}

/// Writes units into a caller-provided buffer, front to back.
pub struct SliceSink<'a, U> {
    buffer: &'a mut [U],
    position: usize,
}

impl<'a, U> SliceSink<'a, U> {
    pub fn new(buffer: &'a mut [U]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of units written so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The written prefix of the buffer.
    pub fn written(&self) -> &[U] {
        &self.buffer[..self.position]
    }

    pub fn into_written(self) -> &'a mut [U] {
        &mut self.buffer[..self.position]
    }
}

impl<U> Sink<U> for SliceSink<'_, U> {
    /// # Panics
    ///
    /// Panics when the buffer is full.
    #[inline]
    fn put(&mut self, unit: U) {
        self.buffer[self.position] = unit;
        self.position += 1;
    }
}
