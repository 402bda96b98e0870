/// Typed event channel, one per concern.
///
/// Replaces string-keyed event buses: every producer declares its own event
/// payload type and consumers get compile-time checked shapes. Events are
/// recorded in emission order and handed over in batches via [`drain`].
///
/// [`drain`]: Channel::drain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel<E> {
    events: Vec<E>,
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> Channel<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::Channel;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Ping(u32);

    #[test]
    fn records_events_in_order() {
        let mut ch = Channel::new();
        ch.emit(Ping(1));
        ch.emit(Ping(2));
        assert_eq!(ch.events(), &[Ping(1), Ping(2)]);
    }

    #[test]
    fn drain_clears_events() {
        let mut ch = Channel::new();
        ch.emit(Ping(7));
        let drained = ch.drain();
        assert_eq!(drained, vec![Ping(7)]);
        assert!(ch.is_empty());
    }
}
