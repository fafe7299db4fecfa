use crate::{
    call::{next_sequence, CallRecord},
    OutOfRange, Settled, Value,
};

/// Append-only log of the calls made to a double.
#[derive(Debug, Default)]
pub(crate) struct Store {
    records: Vec<CallRecord>,
    // bumped on every reset so handles to cleared calls go stale
    generation: u64,
}

/// Refers to a call that has been recorded but not finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle {
    generation: u64,
    index: usize,
}

impl Store {
    /// Appends a call without an outcome.
    pub fn record(&mut self, args: Vec<Value>, this: Value) -> Handle {
        let index = self.records.len();
        self.records.push(CallRecord {
            index,
            sequence: next_sequence(),
            args,
            this,
            outcome: None,
        });

        Handle {
            generation: self.generation,
            index,
        }
    }

    /// Sets the outcome of a call.
    ///
    /// Does nothing if the history was reset since the call was
    /// recorded or if the call already has an outcome.
    pub fn finalize(&mut self, handle: Handle, outcome: Settled) {
        if handle.generation != self.generation {
            return;
        }

        if let Some(record) = self.records.get_mut(handle.index) {
            if record.outcome.is_none() {
                record.outcome = Some(outcome);
            }
        }
    }

    pub fn all(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn at(&self, index: usize) -> Result<&CallRecord, OutOfRange> {
        self.records.get(index).ok_or(OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn first(&self) -> Result<&CallRecord, OutOfRange> {
        self.at(0)
    }

    pub fn last(&self) -> Result<&CallRecord, OutOfRange> {
        match self.records.len() {
            0 => Err(OutOfRange { index: 0, len: 0 }),
            len => self.at(len - 1),
        }
    }

    /// Clears every recorded call.
    pub fn reset(&mut self) {
        self.records.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn records_in_order() {
        let mut store = Store::default();
        let first = store.record(args![1], Value::Undefined);
        let second = store.record(args![2], Value::Undefined);

        store.finalize(second, Ok(Value::from("b")));
        store.finalize(first, Ok(Value::from("a")));

        assert_eq!(store.len(), 2);
        assert_eq!(store.first().unwrap().args(), &args![1][..]);
        assert_eq!(store.last().unwrap().return_value(), Some(&Value::from("b")));
        assert!(store.all()[0].called_before(&store.all()[1]));
    }

    #[test]
    fn out_of_range_reports_the_length() {
        let mut store = Store::default();
        assert_eq!(store.last().unwrap_err(), OutOfRange { index: 0, len: 0 });

        store.record(args![], Value::Undefined);
        assert_eq!(store.at(3).unwrap_err(), OutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn outcomes_are_written_once() {
        let mut store = Store::default();
        let handle = store.record(args![], Value::Undefined);

        store.finalize(handle, Ok(Value::from(1)));
        store.finalize(handle, Ok(Value::from(2)));

        assert!(store.first().unwrap().returned(&Value::from(1)));
    }

    #[test]
    fn stale_handles_are_ignored_after_reset() {
        let mut store = Store::default();
        let stale = store.record(args![], Value::Undefined);

        store.reset();
        let fresh = store.record(args![], Value::Undefined);
        store.finalize(stale, Ok(Value::from("stale")));

        assert_eq!(store.len(), 1);
        assert!(!store.first().unwrap().is_finished());

        store.finalize(fresh, Ok(Value::from("fresh")));
        assert!(store.first().unwrap().returned(&Value::from("fresh")));
    }
}
