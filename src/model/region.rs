use std::collections::BTreeSet;
use std::fmt;

/// Membership code of one Venn/UpSet region. Bit `i` (character `i` of the
/// rendered code, left to right) stands for input set `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionCode {
    mask: u32,
    width: u8,
}

impl RegionCode {
    pub const MAX_WIDTH: usize = 16;

    pub fn from_membership(membership: &[bool]) -> Self {
        let mut mask = 0u32;
        for (i, &member) in membership.iter().enumerate() {
            if member {
                mask |= 1 << i;
            }
        }
        Self {
            mask,
            width: membership.len() as u8,
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        if code.is_empty() || code.len() > Self::MAX_WIDTH {
            return None;
        }
        let mut membership = Vec::with_capacity(code.len());
        for ch in code.chars() {
            match ch {
                '0' => membership.push(false),
                '1' => membership.push(true),
                _ => return None,
            }
        }
        Some(Self::from_membership(&membership))
    }

    /// Every non-zero code of the given width in canonical order.
    pub fn all(width: usize) -> Vec<RegionCode> {
        let mut codes: Vec<RegionCode> = (1u32..(1u32 << width))
            .map(|mask| RegionCode {
                mask,
                width: width as u8,
            })
            .collect();
        codes.sort_by(|a, b| canonical_cmp(a, b));
        codes
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn contains(&self, set_index: usize) -> bool {
        set_index < self.width() && self.mask & (1 << set_index) != 0
    }

    pub fn member_count(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width()).filter(|&i| self.contains(i))
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.width() {
            f.write_str(if self.contains(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

// Fewest memberships first; within a tier, set 0 before set 1 and so on
// ("100", "010", "001", "110", "101", "011", "111").
fn canonical_cmp(a: &RegionCode, b: &RegionCode) -> std::cmp::Ordering {
    a.member_count()
        .cmp(&b.member_count())
        .then_with(|| b.to_string().cmp(&a.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: RegionCode,
    pub ids: BTreeSet<String>,
}

/// Disjoint decomposition of N named identifier sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub set_names: Vec<String>,
    pub regions: Vec<Region>,
}

impl Partition {
    pub fn width(&self) -> usize {
        self.set_names.len()
    }

    pub fn get(&self, code: &RegionCode) -> Option<&BTreeSet<String>> {
        self.regions
            .iter()
            .find(|r| &r.code == code)
            .map(|r| &r.ids)
    }

    #[cfg(test)]
    pub fn get_str(&self, code: &str) -> Option<&BTreeSet<String>> {
        RegionCode::parse(code).and_then(|c| self.get(&c))
    }

    pub fn non_empty(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| !r.ids.is_empty())
    }

    pub fn total_ids(&self) -> usize {
        self.regions.iter().map(|r| r.ids.len()).sum()
    }
}
