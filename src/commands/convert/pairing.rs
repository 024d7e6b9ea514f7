use crate::{
    core::{bedpe::BedpeRecord, variant::Variant},
    utils::util::Result,
};
use std::{collections::HashMap, fmt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PairingStats {
    pub records: usize,
    pub single_line: usize,
    pub pairs: usize,
    pub orphan_primaries: usize,
    pub orphan_secondaries: usize,
}

impl PairingStats {
    pub fn rows(&self) -> usize {
        self.single_line + self.pairs + self.orphan_primaries + self.orphan_secondaries
    }
}

/// The half of a breakend event that never arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingHalf {
    Primary,
    Secondary,
}

/// A breakend event flushed without its counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub event: String,
    pub missing: MissingHalf,
}

impl fmt::Display for Orphan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.missing {
            MissingHalf::Primary => "primary",
            MissingHalf::Secondary => "secondary",
        };
        write!(f, "Missing {half} multiline variant at ID:{}", self.event)
    }
}

struct Pending<'h> {
    arrival: u64,
    variant: Variant<'h>,
}

/// Pairs multi-line breakend records by their `EVENT` id.
///
/// Single-line records are converted as they arrive. A breakend half is held
/// until its counterpart arrives, at which point one row is emitted for the
/// pair. Halves still held at the end of the stream are emitted by `finish`
/// as orphans.
pub struct BreakendPairer<'h> {
    primaries: HashMap<String, Pending<'h>>,
    secondaries: HashMap<String, Pending<'h>>,
    next_arrival: u64,
    orphans: Vec<Orphan>,
    pub stats: PairingStats,
}

impl Default for BreakendPairer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h> BreakendPairer<'h> {
    pub fn new() -> Self {
        Self {
            primaries: HashMap::new(),
            secondaries: HashMap::new(),
            next_arrival: 0,
            orphans: Vec::new(),
            stats: PairingStats::default(),
        }
    }

    pub fn pending(&self) -> usize {
        self.primaries.len() + self.secondaries.len()
    }

    /// Events reported as orphans so far, in the order they were flushed.
    pub fn orphans(&self) -> &[Orphan] {
        &self.orphans
    }

    pub fn push(&mut self, variant: Variant<'h>) -> Result<Option<BedpeRecord>> {
        self.stats.records += 1;
        if !variant.svtype()?.is_breakend() {
            self.stats.single_line += 1;
            return BedpeRecord::from_variant(&variant).map(Some);
        }

        let event = variant.event_id()?;
        if variant.is_secondary() {
            if let Some(primary) = self.primaries.remove(&event) {
                self.stats.pairs += 1;
                return BedpeRecord::from_breakends(Some(primary.variant), Some(variant)).map(Some);
            }
            log::trace!("Holding secondary breakend {} for event {event}", variant.id);
            Self::hold(&mut self.secondaries, &mut self.next_arrival, event, variant);
        } else {
            if let Some(secondary) = self.secondaries.remove(&event) {
                self.stats.pairs += 1;
                return BedpeRecord::from_breakends(Some(variant), Some(secondary.variant))
                    .map(Some);
            }
            log::trace!("Holding primary breakend {} for event {event}", variant.id);
            Self::hold(&mut self.primaries, &mut self.next_arrival, event, variant);
        }
        Ok(None)
    }

    fn hold(
        pending: &mut HashMap<String, Pending<'h>>,
        next_arrival: &mut u64,
        event: String,
        variant: Variant<'h>,
    ) {
        let arrival = *next_arrival;
        *next_arrival += 1;
        if let Some(replaced) = pending.insert(event.clone(), Pending { arrival, variant }) {
            log::debug!(
                "Replacing unresolved breakend {} for event {event}",
                replaced.variant.id
            );
        }
    }

    fn drain_in_arrival_order(
        pending: &mut HashMap<String, Pending<'h>>,
    ) -> Vec<(String, Variant<'h>)> {
        let mut drained: Vec<(String, Pending<'h>)> = pending.drain().collect();
        drained.sort_by_key(|(_, p)| p.arrival);
        drained.into_iter().map(|(id, p)| (id, p.variant)).collect()
    }

    fn report_orphan(&mut self, event: String, missing: MissingHalf) {
        let orphan = Orphan { event, missing };
        log::warn!("{orphan}");
        match missing {
            MissingHalf::Primary => self.stats.orphan_secondaries += 1,
            MissingHalf::Secondary => self.stats.orphan_primaries += 1,
        }
        self.orphans.push(orphan);
    }

    /// Emits everything still held: events with both halves pending first,
    /// then orphaned primaries, then orphaned secondaries, each in arrival order.
    pub fn finish(&mut self) -> Result<Vec<BedpeRecord>> {
        let mut rows = Vec::with_capacity(self.pending());

        let mut both: Vec<(u64, String)> = self
            .primaries
            .iter()
            .filter(|(event, _)| self.secondaries.contains_key(*event))
            .map(|(event, p)| (p.arrival, event.clone()))
            .collect();
        both.sort();
        for (_, event) in both {
            if let (Some(primary), Some(secondary)) =
                (self.primaries.remove(&event), self.secondaries.remove(&event))
            {
                self.stats.pairs += 1;
                rows.push(BedpeRecord::from_breakends(
                    Some(primary.variant),
                    Some(secondary.variant),
                )?);
            }
        }

        for (event, primary) in Self::drain_in_arrival_order(&mut self.primaries) {
            self.report_orphan(event, MissingHalf::Secondary);
            rows.push(BedpeRecord::from_breakends(Some(primary), None)?);
        }
        for (event, secondary) in Self::drain_in_arrival_order(&mut self.secondaries) {
            self.report_orphan(event, MissingHalf::Primary);
            rows.push(BedpeRecord::from_breakends(None, Some(secondary))?);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::MISSING_INFO,
        core::variant::test_utils::{sv_header, variant},
        utils::util::init_logger,
    };

    const E1_PRIMARY: &str = "chr1\t100\t1_1\tN\tN[chr2:500[\t60\tPASS\tSVTYPE=BND;EVENT=E1\tGT:SU\t0/1:3\t0/0:0";
    const E1_SECONDARY: &str = "chr2\t500\t1_2\tN\t]chr1:100]N\t60\tPASS\tSVTYPE=BND;EVENT=E1;SECONDARY\tGT:SU\t0/1:3\t0/0:0";
    const E2_PRIMARY: &str = "chr3\t10\t2_1\tA\tA]chr4:20]\t.\tPASS\tSVTYPE=BND;EVENT=E2";
    const E3_SECONDARY: &str = "chr5\t30\t3_2\tA\t[chr6:40[A\t.\tPASS\tSVTYPE=BND;EVENT=E3;SECONDARY";
    const DEL: &str = "chr1\t1000\tdel1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=2000";

    #[test]
    fn single_line_records_bypass_pairing() -> Result<()> {
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        let row = pairer.push(variant(&header, DEL))?.expect("row should be emitted");
        assert_eq!(row.id, "del1");
        assert_eq!(pairer.pending(), 0);
        assert!(pairer.finish()?.is_empty());
        assert_eq!(pairer.stats.single_line, 1);
        Ok(())
    }

    #[test]
    fn pair_is_emitted_when_second_half_arrives() -> Result<()> {
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        assert!(pairer.push(variant(&header, E1_PRIMARY))?.is_none());
        assert_eq!(pairer.pending(), 1);
        let row = pairer
            .push(variant(&header, E1_SECONDARY))?
            .expect("pair should complete");
        assert_eq!(row.id, "E1");
        assert_eq!(pairer.pending(), 0);
        assert!(pairer.finish()?.is_empty());
        assert!(pairer.orphans().is_empty());
        assert_eq!(pairer.stats.pairs, 1);
        assert_eq!(pairer.stats.rows(), 1);
        Ok(())
    }

    #[test]
    fn pair_is_independent_of_arrival_order() -> Result<()> {
        let header = sv_header();

        let mut forward = BreakendPairer::new();
        assert!(forward.push(variant(&header, E1_PRIMARY))?.is_none());
        let forward_row = forward.push(variant(&header, E1_SECONDARY))?.unwrap();

        let mut reverse = BreakendPairer::new();
        assert!(reverse.push(variant(&header, E1_SECONDARY))?.is_none());
        let reverse_row = reverse.push(variant(&header, E1_PRIMARY))?.unwrap();

        assert_eq!(forward_row, reverse_row);
        assert_eq!(forward_row.chrom_a, "chr1");
        assert_eq!(forward_row.strands, *b"+-");
        Ok(())
    }

    #[test]
    fn orphans_are_flushed_once_in_arrival_order() -> Result<()> {
        init_logger();
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        assert!(pairer.push(variant(&header, E3_SECONDARY))?.is_none());
        assert!(pairer.push(variant(&header, E2_PRIMARY))?.is_none());
        assert!(pairer.push(variant(&header, E1_PRIMARY))?.is_none());

        let rows = pairer.finish()?;
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1", "E3"]);
        assert_eq!(rows[0].info_b, MISSING_INFO);
        assert_eq!(rows[1].info_b, MISSING_INFO);
        assert_eq!(rows[2].info_a, MISSING_INFO);
        assert_eq!(rows[2].chrom_a, "chr6");
        assert_eq!(rows[2].chrom_b, "chr5");
        assert_eq!(pairer.stats.orphan_primaries, 2);
        assert_eq!(pairer.stats.orphan_secondaries, 1);

        let warnings: Vec<String> = pairer.orphans().iter().map(|o| o.to_string()).collect();
        assert_eq!(
            warnings,
            vec![
                "Missing secondary multiline variant at ID:E2",
                "Missing secondary multiline variant at ID:E1",
                "Missing primary multiline variant at ID:E3",
            ]
        );
        assert_eq!(pairer.orphans()[2].missing, MissingHalf::Primary);

        assert!(pairer.finish()?.is_empty());
        assert_eq!(pairer.orphans().len(), 3);
        Ok(())
    }

    #[test]
    fn later_primary_replaces_unresolved_one() -> Result<()> {
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        let first = "chr1\t100\tfirst\tN\tN[chr2:500[\t.\tPASS\tSVTYPE=BND;EVENT=E1";
        let second = "chr1\t150\tsecond\tN\tN[chr2:500[\t.\tPASS\tSVTYPE=BND;EVENT=E1";
        assert!(pairer.push(variant(&header, first))?.is_none());
        assert!(pairer.push(variant(&header, second))?.is_none());
        assert_eq!(pairer.pending(), 1);
        let row = pairer.push(variant(&header, E1_SECONDARY))?.unwrap();
        assert_eq!(row.interval_a.start, 150);
        Ok(())
    }

    #[test]
    fn breakend_without_event_is_an_error() {
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        let v = variant(&header, "chr1\t100\tb\tN\tN[chr2:500[\t.\tPASS\tSVTYPE=BND");
        assert!(pairer.push(v).is_err());
    }

    #[test]
    fn record_without_svtype_is_an_error() {
        let header = sv_header();
        let mut pairer = BreakendPairer::new();
        let v = variant(&header, "chr1\t100\tb\tN\t<DEL>\t.\tPASS\tEND=200");
        assert!(pairer.push(v).is_err());
    }
}
