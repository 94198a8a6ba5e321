use thiserror::Error;

/// Largest prime below `2^16`; both accumulators are kept modulo this.
const MOD: u32 = 65521;

/// Returned by [`Adler32::roll_out`] when the window holds no bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("rolling checksum window is empty, nothing to roll out")]
pub struct EmptyWindow;

/// Adler-32 style rolling checksum over a sliding byte window.
///
/// Unlike the classic Adler-32, the first accumulator starts at zero.
/// `roll_in` appends a byte in O(1); `roll_out` removes the oldest byte
/// in O(1) using the window length, so sliding a saturated window costs
/// a constant amount of work per target byte.
///
/// The window lives in a single buffer with a head cursor; rolled-out
/// bytes are reclaimed by periodic compaction rather than reallocation.
#[derive(Clone, Debug, Default)]
pub struct Adler32 {
    buf: Vec<u8>,
    head: usize,
    removed: u8,
    a: u16,
    b: u16,
}

impl Adler32 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-initialise the window to `data`, replacing any previous state.
    ///
    /// Equivalent to `reset()` followed by `roll_in` of every byte of
    /// `data` in order.
    pub fn write(&mut self, data: &[u8]) {
        self.reset();
        self.buf.extend_from_slice(data);
        let (a, b) = accumulate(data);
        self.a = a;
        self.b = b;
    }

    /// Append `byte` to the window.
    #[allow(clippy::cast_possible_truncation)]
    pub fn roll_in(&mut self, byte: u8) {
        let a = (u32::from(self.a) + u32::from(byte)) % MOD;
        let b = (u32::from(self.b) + a) % MOD;
        self.a = a as u16;
        self.b = b as u16;
        self.buf.push(byte);
    }

    /// Remove and return the oldest byte in the window.
    ///
    /// The second accumulator is adjusted with the window length *before*
    /// removal. The count never goes below zero: rolling out of an empty
    /// window fails with [`EmptyWindow`] and leaves the state untouched.
    ///
    /// # Errors
    /// Returns [`EmptyWindow`] if the window holds no bytes.
    #[allow(clippy::cast_possible_truncation)]
    pub fn roll_out(&mut self) -> Result<u8, EmptyWindow> {
        if self.head == self.buf.len() {
            return Err(EmptyWindow);
        }

        let oldest = self.buf[self.head];
        let len = (self.count() % MOD as usize) as u32;
        let a = (u32::from(self.a) + MOD - u32::from(oldest)) % MOD;
        let b = (u32::from(self.b) + MOD - len * u32::from(oldest) % MOD) % MOD;
        self.a = a as u16;
        self.b = b as u16;
        self.removed = oldest;
        self.head += 1;

        // Reclaim the consumed front half so the buffer stays near the
        // window size instead of growing with the whole input.
        if self.head * 2 >= self.buf.len() {
            self.buf.copy_within(self.head.., 0);
            self.buf.truncate(self.buf.len() - self.head);
            self.head = 0;
        }

        Ok(oldest)
    }

    /// Composite checksum of the current window.
    #[must_use]
    pub fn sum(&self) -> u32 {
        (u32::from(self.b) << 16) | u32::from(self.a)
    }

    /// Number of bytes currently in the window.
    #[must_use]
    pub fn count(&self) -> usize {
        self.buf.len() - self.head
    }

    /// The bytes currently in the window, oldest first.
    #[must_use]
    pub fn window(&self) -> &[u8] {
        &self.buf[self.head..]
    }

    /// The last byte returned by [`Self::roll_out`]; zero before any roll-out.
    #[must_use]
    pub fn removed(&self) -> u8 {
        self.removed
    }

    /// Zero the state. The window buffer is truncated, not reallocated.
    pub fn reset(&mut self) {
        self.a = 0;
        self.b = 0;
        self.head = 0;
        self.removed = 0;
        self.buf.clear();
    }

    /// One-shot checksum of `data`, without touching any window state.
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> u32 {
        let (a, b) = accumulate(data);
        (u32::from(b) << 16) | u32::from(a)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn accumulate(data: &[u8]) -> (u16, u16) {
    let mut a = 0u32;
    let mut b = 0u32;
    for &byte in data {
        a = (a + u32::from(byte)) % MOD;
        b = (b + a) % MOD;
    }
    (a as u16, b as u16)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_checksum() {
        let mut hasher = Adler32::new();
        hasher.write(b"how are you doing");
        assert_eq!(hasher.sum(), 944_178_772);
        assert_eq!(Adler32::compute(b"how are you doing"), 944_178_772);
    }

    #[test]
    fn bulk_equals_incremental() {
        let data = b"a small test for chunk split and rolling hash";

        let mut bulk = Adler32::new();
        bulk.write(data);

        let mut incremental = Adler32::new();
        for &byte in data {
            incremental.roll_in(byte);
        }

        assert_eq!(bulk.sum(), incremental.sum());
        assert_eq!(bulk.window(), incremental.window());
        assert_eq!(bulk.count(), incremental.count());
    }

    #[test]
    fn roll_out_matches_shorter_write() {
        let data = b"i am here guys";

        let mut rolled = Adler32::new();
        rolled.write(data);
        let removed = rolled.roll_out().unwrap();
        assert_eq!(removed, b'i');
        assert_eq!(rolled.removed(), b'i');

        let mut rest = Adler32::new();
        rest.write(&data[1..]);
        assert_eq!(rolled.sum(), rest.sum());
        assert_eq!(rolled.window(), &data[1..]);
    }

    #[test]
    fn sliding_window_tracks_recompute() {
        let data: Vec<u8> = (0u8..64).map(|i| i.wrapping_mul(37)).collect();
        let window = 16;

        let mut hasher = Adler32::new();
        for (i, &byte) in data.iter().enumerate() {
            hasher.roll_in(byte);
            if hasher.count() > window {
                hasher.roll_out().unwrap();
            }
            if i + 1 >= window {
                let start = i + 1 - window;
                assert_eq!(hasher.sum(), Adler32::compute(&data[start..=i]));
                assert_eq!(hasher.window(), &data[start..=i]);
            }
        }
    }

    #[test]
    fn roll_out_on_empty_window_fails() {
        let mut hasher = Adler32::new();
        assert_eq!(hasher.roll_out(), Err(EmptyWindow));
        assert_eq!(hasher.count(), 0);

        hasher.write(b"ab");
        hasher.roll_out().unwrap();
        hasher.roll_out().unwrap();
        assert_eq!(hasher.count(), 0);
        assert_eq!(hasher.roll_out(), Err(EmptyWindow));
        assert_eq!(hasher.count(), 0);
        assert_eq!(hasher.sum(), 0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut hasher = Adler32::new();
        hasher.write(b"some state");
        hasher.roll_out().unwrap();
        hasher.reset();

        assert_eq!(hasher.sum(), 0);
        assert_eq!(hasher.count(), 0);
        assert_eq!(hasher.removed(), 0);
        assert!(hasher.window().is_empty());
    }
}
