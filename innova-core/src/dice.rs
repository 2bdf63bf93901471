//! Small helpers over an injected `RngCore`.

use rand_core::RngCore;

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn pick_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

pub fn pick<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[pick_index(rng, items.len())]
}

/// Integer in `low..low + span`, like `floor(random * span) + low`.
pub fn roll<R: RngCore + ?Sized>(rng: &mut R, low: u8, span: u8) -> u8 {
    low + pick_index(rng, span as usize) as u8
}

#[cfg(test)]
pub(crate) mod testing {
    use rand_core::{impls, Error, RngCore};

    /// Deterministic generator that counts up from `start`.
    pub struct StepRng {
        pub next: u64,
        pub step: u64,
    }

    impl StepRng {
        pub fn new(start: u64, step: u64) -> Self {
            Self { next: start, step }
        }
    }

    impl RngCore for StepRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let v = self.next;
            self.next = self.next.wrapping_add(self.step);
            v
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            impls::fill_bytes_via_next(self, dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }
}
