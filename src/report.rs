use crate::angles::AngleTriple;
use crate::composer::check_contiguous;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

const SEPARATOR: &str = "=====================================";

/// One step of a run: where it started, what was done, and where it ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceEntry {
    /// Step number, starting at 1.
    pub index: usize,
    pub start: AngleTriple,
    pub maneuver: AngleTriple,
    pub end: AngleTriple,
}

/// The ordered (start, maneuver, end) listing of a run.
///
/// A trace can only be built from attitudes keyed 0 through N and maneuvers keyed 1 through N.
///
/// Printing a trace gives one block per step, with angles rounded to two decimals unless another
/// precision is requested (eg `{:.4}`):
///
/// ```text
/// =====================================
/// Starting Attitude: [10.00, 0.00, 0.00]
/// Maneuver Required: [20.00, 0.00, 0.00]
/// Ending Attitude:   [30.00, 0.00, 0.00]
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Pairs up attitudes and maneuvers, checking first that there is exactly one more attitude
    /// than there are maneuvers, and then that both are numbered without gaps.
    pub fn from_angles(
        attitudes: &BTreeMap<usize, AngleTriple>,
        maneuvers: &BTreeMap<usize, AngleTriple>,
    ) -> Result<Self> {
        let difference = attitudes.len() as isize - maneuvers.len() as isize;
        if difference != 1 {
            return Err(Error::InconsistentSequence { difference });
        }
        check_contiguous(attitudes.keys().copied(), 0)?;
        check_contiguous(maneuvers.keys().copied(), 1)?;

        let entries = maneuvers
            .iter()
            .map(|(&index, &maneuver)| TraceEntry {
                index,
                start: attitudes[&(index - 1)],
                maneuver,
                end: attitudes[&index],
            })
            .collect();
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emits every entry as an `info` event.
    pub fn log(&self) {
        for entry in &self.entries {
            tracing::info!(
                step = entry.index,
                start = %entry.start,
                maneuver = %entry.maneuver,
                end = %entry.end,
                "maneuver step"
            );
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for TraceEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Starting Attitude: {:.precision$}", self.start)?;
        writeln!(f, "Maneuver Required: {:.precision$}", self.maneuver)?;
        write!(f, "Ending Attitude:   {:.precision$}", self.end)
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry:.precision$}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Trace;
    use crate::angles::AngleTriple;
    use crate::composer::SequenceComposer;
    use crate::error::Error;
    use crate::resolver::CommandMode;
    use crate::sequence::EulerConvention;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn t(a: f64, b: f64, c: f64) -> AngleTriple {
        AngleTriple::new([a, b, c]).unwrap()
    }

    fn keyed(first: usize, count: usize) -> BTreeMap<usize, AngleTriple> {
        (first..first + count)
            .map(|k| (k, t(k as f64, 0., 0.)))
            .collect()
    }

    #[test]
    fn yaw_chain_report() {
        let plan = SequenceComposer::new(EulerConvention::default(), CommandMode::CommandedAttitude)
            .compose(
                t(10., 0., 0.),
                &vec![t(30., 0., 0.), t(100., 0., 0.), t(60., 0., 0.)].into(),
            );
        let trace = plan.trace().unwrap();
        assert_eq!(trace.len(), 3);
        insta::assert_snapshot!(trace.to_string(), @r"
        =====================================
        Starting Attitude: [10.00, 0.00, 0.00]
        Maneuver Required: [20.00, 0.00, 0.00]
        Ending Attitude:   [30.00, 0.00, 0.00]
        =====================================
        Starting Attitude: [30.00, 0.00, 0.00]
        Maneuver Required: [70.00, 0.00, 0.00]
        Ending Attitude:   [100.00, 0.00, 0.00]
        =====================================
        Starting Attitude: [100.00, 0.00, 0.00]
        Maneuver Required: [-40.00, 0.00, 0.00]
        Ending Attitude:   [60.00, 0.00, 0.00]
        ");
    }

    #[test]
    fn precision_is_honoured() {
        let trace = Trace::from_angles(
            &BTreeMap::from([(0, t(0., 0., 0.)), (1, t(45., 0., 0.))]),
            &BTreeMap::from([(1, t(45., 0., 0.))]),
        )
        .unwrap();
        assert_eq!(
            format!("{trace:.1}"),
            "=====================================\n\
             Starting Attitude: [0.0, 0.0, 0.0]\n\
             Maneuver Required: [45.0, 0.0, 0.0]\n\
             Ending Attitude:   [45.0, 0.0, 0.0]"
        );
    }

    #[test]
    fn entries_line_up() {
        let trace = Trace::from_angles(&keyed(0, 3), &keyed(1, 2)).unwrap();
        let indices: Vec<_> = trace.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2]);
        let second = trace.entries()[1];
        assert_eq!(second.start, t(1., 0., 0.));
        assert_eq!(second.maneuver, t(2., 0., 0.));
        assert_eq!(second.end, t(2., 0., 0.));
    }

    #[test]
    fn lone_attitude_has_an_empty_trace() {
        let trace = Trace::from_angles(&keyed(0, 1), &BTreeMap::new()).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.to_string(), "");
    }

    #[rstest]
    #[case(3, 0, 3)]
    #[case(5, 2, 3)]
    #[case(2, 2, 0)]
    #[case(1, 3, -2)]
    #[case(0, 0, 0)]
    fn counts_must_differ_by_one(
        #[case] attitudes: usize,
        #[case] maneuvers: usize,
        #[case] difference: isize,
    ) {
        assert_eq!(
            Trace::from_angles(&keyed(0, attitudes), &keyed(1, maneuvers)),
            Err(Error::InconsistentSequence { difference })
        );
    }

    #[test]
    fn counts_are_checked_before_keys() {
        // both misnumbered and unbalanced: the imbalance is what gets reported
        assert_eq!(
            Trace::from_angles(&keyed(5, 2), &keyed(5, 2)),
            Err(Error::InconsistentSequence { difference: 0 })
        );
    }

    #[rstest]
    #[case(keyed(1, 3), keyed(1, 2), 0, 1)]
    #[case(keyed(0, 3), keyed(0, 2), 1, 0)]
    #[case(keyed(0, 3), BTreeMap::from([(1, t(0., 0., 0.)), (3, t(0., 0., 0.))]), 2, 3)]
    fn keys_must_be_contiguous(
        #[case] attitudes: BTreeMap<usize, AngleTriple>,
        #[case] maneuvers: BTreeMap<usize, AngleTriple>,
        #[case] expected: usize,
        #[case] found: usize,
    ) {
        assert_eq!(
            Trace::from_angles(&attitudes, &maneuvers),
            Err(Error::NonContiguousSteps { expected, found })
        );
    }

    #[test]
    fn logging_does_not_disturb_the_trace() {
        let trace = Trace::from_angles(&keyed(0, 2), &keyed(1, 1)).unwrap();
        trace.log();
        assert_eq!(trace.len(), 1);
    }
}
