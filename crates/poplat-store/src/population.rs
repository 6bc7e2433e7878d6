//! The dual-indexed occupant store.
//!
//! [`Population`] owns every occupant of a simulation. Occupant records
//! live in an arena of slots; two sets of key lists index them:
//!
//! - per species: all live members, in arbitrary but index-stable order;
//! - per site and species: the members currently at that site.
//!
//! Removal from either list is a swap-remove: the last key moves into the
//! vacated position and the moved occupant's stored index is patched.
//! This keeps removal O(1) but means positions shift under mutation, so
//! callers that destroy occupants while walking a list must copy the list
//! first (see [`occupants_at`](Population::occupants_at)).

use indexmap::map::Entry;
use indexmap::IndexMap;
use poplat_core::{OccupantId, SiteId, SpeciesId, StoreError};
use smallvec::SmallVec;

use crate::checks::IndexChecks;
use crate::key::{OccupantKey, OccupantRef};

/// A single occupant record in the arena.
#[derive(Clone, Copy, Debug)]
struct OccupantSlot {
    id: OccupantId,
    species: SpeciesId,
    site: SiteId,
    species_index: u32,
    site_index: u32,
    generation: u32,
    live: bool,
}

/// Per-site key lists, one per registered species.
#[derive(Clone, Debug, Default)]
struct SiteOccupancy {
    by_species: SmallVec<[Vec<OccupantKey>; 4]>,
}

/// Occupant store with O(1) membership maintenance in two indexes.
///
/// Species are registered by unique name and receive sequential
/// [`SpeciesId`]s. Sites are plain indices `0..site_count`; the store does
/// not know the lattice geometry.
///
/// # Examples
///
/// ```
/// use poplat_core::SiteId;
/// use poplat_store::{IndexChecks, Population};
///
/// let mut pop = Population::new(4, IndexChecks::Checked);
/// let fox = pop.add_species("fox").unwrap();
///
/// let a = pop.spawn(fox, SiteId(0)).unwrap();
/// let b = pop.spawn(fox, SiteId(0)).unwrap();
/// pop.relocate(a, SiteId(3)).unwrap();
/// assert_eq!(pop.count(fox), 2);
/// assert_eq!(pop.count_at(SiteId(0), fox), 1);
///
/// pop.despawn(b).unwrap();
/// assert!(!pop.is_live(b));
/// assert!(pop.despawn(b).is_err());
/// pop.verify_integrity().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Population {
    /// All occupant slots, live and dead.
    slots: Vec<OccupantSlot>,
    /// Dead slots available for reuse.
    free_list: Vec<u32>,
    /// Species name → live member keys. `SpeciesId(n)` is entry `n`.
    species: IndexMap<String, Vec<OccupantKey>>,
    /// Per-site occupancy, indexed by `SiteId`.
    sites: Vec<SiteOccupancy>,
    /// Next `OccupantId` to hand out.
    next_id: u64,
    checks: IndexChecks,
}

impl Population {
    /// Create an empty store covering `site_count` sites.
    pub fn new(site_count: usize, checks: IndexChecks) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            species: IndexMap::new(),
            sites: vec![SiteOccupancy::default(); site_count],
            next_id: 0,
            checks,
        }
    }

    // ── Species registry ────────────────────────────────────────

    /// Register a new species.
    ///
    /// Returns `Err(StoreError::DuplicateSpecies)` if `name` is taken.
    pub fn add_species(&mut self, name: &str) -> Result<SpeciesId, StoreError> {
        let id = match self.species.entry(name.to_owned()) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateSpecies {
                    name: name.to_owned(),
                })
            }
            Entry::Vacant(v) => {
                let id = SpeciesId(v.index() as u32);
                v.insert(Vec::new());
                id
            }
        };
        for site in &mut self.sites {
            site.by_species.push(Vec::new());
        }
        Ok(id)
    }

    /// Number of registered species.
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// All registered species IDs, in registration order.
    pub fn species_ids(&self) -> impl Iterator<Item = SpeciesId> {
        (0..self.species.len() as u32).map(SpeciesId)
    }

    /// Look up a species by name.
    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.species.get_index_of(name).map(|i| SpeciesId(i as u32))
    }

    /// Name of a species.
    pub fn species_name(&self, species: SpeciesId) -> Option<&str> {
        self.species
            .get_index(species.index())
            .map(|(name, _)| name.as_str())
    }

    /// Number of sites covered by this store.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Create an occupant of `species` at `site`.
    ///
    /// Appends the new key to the species list and to the site's list for
    /// that species, recording both positions on the occupant. The
    /// occupant receives the next `OccupantId`.
    pub fn spawn(&mut self, species: SpeciesId, site: SiteId) -> Result<OccupantKey, StoreError> {
        self.check_species(species)?;
        self.check_site(site)?;

        let id = OccupantId(self.next_id);
        self.next_id += 1;

        let members = &mut self.species[species.index()];
        let bucket = &mut self.sites[site.index()].by_species[species.index()];
        let species_index = members.len() as u32;
        let site_index = bucket.len() as u32;

        let key = match self.free_list.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                *entry = OccupantSlot {
                    id,
                    species,
                    site,
                    species_index,
                    site_index,
                    generation: entry.generation,
                    live: true,
                };
                OccupantKey {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(OccupantSlot {
                    id,
                    species,
                    site,
                    species_index,
                    site_index,
                    generation: 0,
                    live: true,
                });
                OccupantKey {
                    slot,
                    generation: 0,
                }
            }
        };

        members.push(key);
        bucket.push(key);
        Ok(key)
    }

    /// Destroy an occupant, removing it from both indexes.
    ///
    /// The slot's generation is bumped, so `key` (and any copy of it) is
    /// stale afterwards.
    pub fn despawn(&mut self, key: OccupantKey) -> Result<(), StoreError> {
        let slot = self.verified_slot(key)?;

        let si = slot.species_index as usize;
        if let Some(moved) = swap_remove_key(&mut self.species[slot.species.index()], si) {
            self.slots[moved.slot as usize].species_index = si as u32;
        }

        let ti = slot.site_index as usize;
        let bucket = &mut self.sites[slot.site.index()].by_species[slot.species.index()];
        if let Some(moved) = swap_remove_key(bucket, ti) {
            self.slots[moved.slot as usize].site_index = ti as u32;
        }

        let entry = &mut self.slots[key.slot as usize];
        entry.live = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_list.push(key.slot);
        Ok(())
    }

    /// Move an occupant to `new_site`.
    ///
    /// Species membership is untouched; only the site lists and the
    /// occupant's site back-reference change. Relocating to the current
    /// site moves the occupant to the end of that site's list.
    pub fn relocate(&mut self, key: OccupantKey, new_site: SiteId) -> Result<(), StoreError> {
        self.check_site(new_site)?;
        let slot = self.verified_slot(key)?;

        let ti = slot.site_index as usize;
        let old = &mut self.sites[slot.site.index()].by_species[slot.species.index()];
        if let Some(moved) = swap_remove_key(old, ti) {
            self.slots[moved.slot as usize].site_index = ti as u32;
        }

        let new = &mut self.sites[new_site.index()].by_species[slot.species.index()];
        let site_index = new.len() as u32;
        new.push(key);

        let entry = &mut self.slots[key.slot as usize];
        entry.site = new_site;
        entry.site_index = site_index;
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Live population of a species. Unknown species count as 0.
    pub fn count(&self, species: SpeciesId) -> usize {
        self.members(species).len()
    }

    /// Live population of a species at one site.
    pub fn count_at(&self, site: SiteId, species: SpeciesId) -> usize {
        self.occupants_at(site, species).len()
    }

    /// Live population across all species.
    pub fn total(&self) -> usize {
        self.species.values().map(Vec::len).sum()
    }

    /// All live members of a species.
    pub fn members(&self, species: SpeciesId) -> &[OccupantKey] {
        self.species
            .get_index(species.index())
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    /// The member at position `index` of the species list.
    pub fn member(&self, species: SpeciesId, index: usize) -> Option<OccupantKey> {
        self.members(species).get(index).copied()
    }

    /// The occupants of `species` currently at `site`.
    ///
    /// This borrows the live list. To destroy or move occupants found
    /// here, copy the keys out first: swap-remove reorders the list.
    pub fn occupants_at(&self, site: SiteId, species: SpeciesId) -> &[OccupantKey] {
        self.sites
            .get(site.index())
            .and_then(|s| s.by_species.get(species.index()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick an occupant of `species` at `site` given a uniform draw in
    /// `[0, count_at(site, species))`.
    ///
    /// Returns `None` if the site holds no such occupant or `draw` is out
    /// of range.
    pub fn sample_uniform(
        &self,
        site: SiteId,
        species: SpeciesId,
        draw: usize,
    ) -> Option<OccupantKey> {
        self.occupants_at(site, species).get(draw).copied()
    }

    /// Whether `key` refers to a live occupant.
    pub fn is_live(&self, key: OccupantKey) -> bool {
        self.live_slot(key).is_some()
    }

    /// Attributes of a live occupant, or `None` if `key` is stale.
    pub fn occupant(&self, key: OccupantKey) -> Option<OccupantRef> {
        self.live_slot(key).map(|slot| OccupantRef {
            id: slot.id,
            species: slot.species,
            site: slot.site,
            species_index: slot.species_index as usize,
            site_index: slot.site_index as usize,
        })
    }

    // ── Verification ────────────────────────────────────────────

    /// Full consistency scan of both indexes.
    ///
    /// Checks that every listed key is live and stores its own position,
    /// that no key appears twice, and that every live occupant is listed
    /// where its back-references say. Runs regardless of [`IndexChecks`].
    pub fn verify_integrity(&self) -> Result<(), StoreError> {
        for (s, members) in self.species.values().enumerate() {
            for (i, &key) in members.iter().enumerate() {
                let slot = self.live_slot(key).ok_or_else(|| stale(key))?;
                if slot.species.index() != s || slot.species_index as usize != i {
                    return Err(StoreError::IndexCorrupted {
                        occupant: slot.id,
                        list: "species",
                        position: i,
                    });
                }
            }
        }

        for (t, site) in self.sites.iter().enumerate() {
            for (s, bucket) in site.by_species.iter().enumerate() {
                for (i, &key) in bucket.iter().enumerate() {
                    let slot = self.live_slot(key).ok_or_else(|| stale(key))?;
                    if slot.site.index() != t
                        || slot.species.index() != s
                        || slot.site_index as usize != i
                    {
                        return Err(StoreError::IndexCorrupted {
                            occupant: slot.id,
                            list: "site",
                            position: i,
                        });
                    }
                }
            }
        }

        for (n, slot) in self.slots.iter().enumerate().filter(|(_, s)| s.live) {
            let key = OccupantKey {
                slot: n as u32,
                generation: slot.generation,
            };
            self.verify_back_references(key, slot)?;
        }
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────

    fn check_species(&self, species: SpeciesId) -> Result<(), StoreError> {
        if species.index() < self.species.len() {
            Ok(())
        } else {
            Err(StoreError::UnknownSpecies { species })
        }
    }

    fn check_site(&self, site: SiteId) -> Result<(), StoreError> {
        if site.index() < self.sites.len() {
            Ok(())
        } else {
            Err(StoreError::UnknownSite {
                site,
                site_count: self.sites.len(),
            })
        }
    }

    fn live_slot(&self, key: OccupantKey) -> Option<&OccupantSlot> {
        self.slots
            .get(key.slot as usize)
            .filter(|s| s.live && s.generation == key.generation)
    }

    /// Resolve `key` for mutation, verifying it when checks are enabled.
    fn verified_slot(&self, key: OccupantKey) -> Result<OccupantSlot, StoreError> {
        let slot = *self.slots.get(key.slot as usize).ok_or_else(|| stale(key))?;
        if self.checks.is_checked() {
            if !slot.live || slot.generation != key.generation {
                return Err(stale(key));
            }
            self.verify_back_references(key, &slot)?;
        } else {
            debug_assert!(
                slot.live && slot.generation == key.generation,
                "stale occupant key {key}"
            );
        }
        Ok(slot)
    }

    fn verify_back_references(
        &self,
        key: OccupantKey,
        slot: &OccupantSlot,
    ) -> Result<(), StoreError> {
        let si = slot.species_index as usize;
        if self.members(slot.species).get(si) != Some(&key) {
            return Err(StoreError::IndexCorrupted {
                occupant: slot.id,
                list: "species",
                position: si,
            });
        }
        let ti = slot.site_index as usize;
        if self.occupants_at(slot.site, slot.species).get(ti) != Some(&key) {
            return Err(StoreError::IndexCorrupted {
                occupant: slot.id,
                list: "site",
                position: ti,
            });
        }
        Ok(())
    }
}

/// Swap-remove `list[index]`; return the key that moved into `index`.
fn swap_remove_key(list: &mut Vec<OccupantKey>, index: usize) -> Option<OccupantKey> {
    list.swap_remove(index);
    list.get(index).copied()
}

fn stale(key: OccupantKey) -> StoreError {
    StoreError::StaleOccupant {
        slot: key.slot,
        generation: key.generation,
    }
}
