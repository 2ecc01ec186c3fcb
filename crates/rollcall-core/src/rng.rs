// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for shuffling and
/// drawing names.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random number uniformly in the range `[0, max)`.
    ///
    /// Draws that fall in the incomplete final bucket of the `u32` range are
    /// rejected, so every value is equally likely. `max` must be positive.
    pub fn generate(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let span: u64 = 1 << 32;
        let limit: u64 = span - span % u64::from(max);
        loop {
            let x = u64::from(self.next_u32());
            if x < limit {
                return (x % u64::from(max)) as u32;
            }
        }
    }

    /// A uniform index into a collection of length `len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.generate(len as u32) as usize
    }
}

/// Fisher-Yates shuffle: every permutation is equally likely.
pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    for i in (1..v.len()).rev() {
        let j = rng.index(i + 1);
        v.swap(i, j);
    }
    v
}
