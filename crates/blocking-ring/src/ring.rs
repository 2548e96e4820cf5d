/// Ring storage without any synchronization of its own.
///
/// Live elements occupy `read .. read + len` (mod capacity); every other slot
/// is `None`.
pub(crate) struct Ring<T> {
    slots: Box<[Option<T>]>,
    read: usize,
    write: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// `capacity` must be non-zero; the queue validates it first.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            read: 0,
            write: 0,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Writes at the write cursor, or hands the value back when full.
    pub(crate) fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.slots[self.write] = Some(value);
        self.write = self.advance(self.write);
        self.len += 1;
        Ok(())
    }

    /// Takes the element at the read cursor, vacating its slot.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.read].take();
        self.read = self.advance(self.read);
        self.len -= 1;
        value
    }

    #[inline]
    fn advance(&self, cursor: usize) -> usize {
        let next = cursor + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    #[cfg(test)]
    fn cursors(&self) -> (usize, usize) {
        (self.read, self.write)
    }
}
