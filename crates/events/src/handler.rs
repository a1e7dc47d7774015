/// Execute an aggregate command deterministically (no IO, no async).
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: applies each event via `aggregate.apply(event)`
///
/// If `handle` rejects the command, nothing is applied and the error is
/// returned unchanged. The emitted events are returned so the caller can
/// record them.
pub fn execute<A>(
    aggregate: &mut A,
    command: &A::Command,
) -> Result<Vec<A::Event>, A::Error>
where
    A: freshstock_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshstock_core::{Aggregate, AggregateRoot};

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
        version: u64,
    }

    #[derive(Debug, Clone)]
    struct Bump(i64);

    impl AggregateRoot for Counter {
        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Aggregate for Counter {
        type Command = i64;
        type Event = Bump;
        type Error = &'static str;

        fn apply(&mut self, event: &Self::Event) {
            self.value += event.0;
            self.version += 1;
        }

        fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            if *command == 0 {
                return Err("zero bump");
            }
            Ok(vec![Bump(*command), Bump(*command)])
        }
    }

    #[test]
    fn execute_applies_every_emitted_event() {
        let mut counter = Counter::default();
        let events = execute(&mut counter, &3).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(counter.value, 6);
        assert_eq!(counter.version(), 2);
    }

    #[test]
    fn rejected_command_leaves_state_untouched() {
        let mut counter = Counter::default();
        assert_eq!(execute(&mut counter, &0).unwrap_err(), "zero bump");
        assert_eq!(counter.value, 0);
        assert_eq!(counter.version(), 0);
    }
}
