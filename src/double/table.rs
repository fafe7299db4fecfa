use std::{collections::BTreeMap, sync::Arc};

use super::Behavior;
use crate::{call::CallRecord, matcher::InvocationMatcher, Value};

pub(crate) type SharedMatcher = Arc<dyn InvocationMatcher>;

/// The behaviors configured on a double and the scopes they apply to.
#[derive(Default)]
pub(crate) struct Table {
    default: Option<Behavior>,
    by_call: BTreeMap<usize, Behavior>,
    // in registration order, newest last
    by_args: Vec<ArgsEntry>,
}

struct ArgsEntry {
    matcher: SharedMatcher,
    default: Option<Behavior>,
    // keyed by how many earlier calls the matcher accepted
    by_call: BTreeMap<usize, Behavior>,
}

impl Table {
    pub fn set_default(&mut self, behavior: Behavior) {
        self.default = Some(behavior);
    }

    pub fn set_for_call(&mut self, index: usize, behavior: Behavior) {
        self.by_call.insert(index, behavior);
    }

    pub fn set_for_args(&mut self, matcher: &SharedMatcher, behavior: Behavior) {
        self.entry(matcher).default = Some(behavior);
    }

    pub fn set_for_args_and_call(
        &mut self,
        matcher: &SharedMatcher,
        relative: usize,
        behavior: Behavior,
    ) {
        self.entry(matcher).by_call.insert(relative, behavior);
    }

    /// Picks the behavior for the call at `index` with `args`, given
    /// the calls recorded before it.
    ///
    /// `None` means nothing was configured for this call.
    pub fn lookup(&self, index: usize, args: &[Value], history: &[CallRecord]) -> Option<&Behavior> {
        let scoped = self
            .by_args
            .iter()
            .rev()
            .filter(|entry| entry.matcher.matches(args))
            .find_map(|entry| {
                let relative = history
                    .iter()
                    .filter(|call| entry.matcher.matches(call.args()))
                    .count();

                entry.by_call.get(&relative).or(entry.default.as_ref())
            });

        scoped
            .or_else(|| self.by_call.get(&index))
            .or(self.default.as_ref())
    }

    /// Forgets every configured behavior.
    pub fn reset(&mut self) {
        *self = Table::default();
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_call.is_empty() && self.by_args.is_empty()
    }

    // finds the entry registered for this exact matcher, re-adding it
    // if the table was reset in the meantime
    fn entry(&mut self, matcher: &SharedMatcher) -> &mut ArgsEntry {
        let position = self
            .by_args
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.matcher, matcher));

        let position = position.unwrap_or_else(|| {
            self.by_args.push(ArgsEntry {
                matcher: matcher.clone(),
                default: None,
                by_call: BTreeMap::new(),
            });
            self.by_args.len() - 1
        });

        &mut self.by_args[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, double::store::Store};

    fn returns(value: i64) -> Behavior {
        Behavior::ReturnsValue(Value::from(value))
    }

    fn returned(behavior: Option<&Behavior>) -> Option<Value> {
        match behavior {
            Some(Behavior::ReturnsValue(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn matcher(expected: Vec<Value>) -> SharedMatcher {
        Arc::new(expected)
    }

    #[test]
    fn unconfigured_lookup_finds_nothing() {
        let table = Table::default();
        assert!(table.lookup(0, &args![], &[]).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn call_index_beats_default() {
        let mut table = Table::default();
        table.set_default(returns(3));
        table.set_for_call(1, returns(2));
        table.set_for_call(1, returns(20));

        assert_eq!(returned(table.lookup(0, &args![], &[])), Some(Value::from(3)));
        assert_eq!(returned(table.lookup(1, &args![], &[])), Some(Value::from(20)));
    }

    #[test]
    fn matcher_beats_call_index() {
        let mut table = Table::default();
        let forty_two = matcher(args![42]);
        table.set_for_call(0, returns(1));
        table.set_for_args(&forty_two, returns(42));

        assert_eq!(returned(table.lookup(0, &args![42], &[])), Some(Value::from(42)));
        assert_eq!(returned(table.lookup(0, &args![7], &[])), Some(Value::from(1)));
    }

    #[test]
    fn relative_index_counts_only_matching_calls() {
        let mut table = Table::default();
        let mut store = Store::default();
        let forty_two = matcher(args![42]);
        table.set_for_args_and_call(&forty_two, 0, returns(1));
        table.set_for_args_and_call(&forty_two, 1, returns(2));

        store.record(args![7], Value::Undefined);
        store.record(args![7], Value::Undefined);
        assert_eq!(
            returned(table.lookup(2, &args![42], store.all())),
            Some(Value::from(1))
        );

        store.record(args![42], Value::Undefined);
        assert_eq!(
            returned(table.lookup(3, &args![42], store.all())),
            Some(Value::from(2))
        );

        store.record(args![42], Value::Undefined);
        assert!(table.lookup(4, &args![42], store.all()).is_none());
    }

    #[test]
    fn newer_matchers_win_and_exhausted_ones_fall_through() {
        let mut table = Table::default();
        let any_first = matcher(args![1]);
        let exact = matcher(args![1, 2]);
        table.set_for_args(&any_first, returns(10));
        table.set_for_args_and_call(&exact, 0, returns(20));

        let mut store = Store::default();
        assert_eq!(
            returned(table.lookup(0, &args![1, 2], store.all())),
            Some(Value::from(20))
        );

        store.record(args![1, 2], Value::Undefined);
        assert_eq!(
            returned(table.lookup(1, &args![1, 2], store.all())),
            Some(Value::from(10))
        );
    }

    #[test]
    fn reset_readds_entries_on_demand() {
        let mut table = Table::default();
        let forty_two = matcher(args![42]);
        table.set_for_args(&forty_two, returns(1));

        table.reset();
        assert!(table.lookup(0, &args![42], &[]).is_none());

        table.set_for_args(&forty_two, returns(2));
        assert_eq!(returned(table.lookup(0, &args![42], &[])), Some(Value::from(2)));
    }
}
