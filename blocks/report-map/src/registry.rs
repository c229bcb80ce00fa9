use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use crate::lifecycle::{MarkerController, MarkerEvent, MarkerState, PopupCommand};
use crate::overview::MarkerSpec;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MarkerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for MarkerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The map widget, as far as markers are concerned.
///
/// Implementations forward the four marker events (pointer enter, pointer
/// leave, click, popup close) to [`MarkerRegistry::dispatch`] while a
/// marker's listeners are bound.
pub trait MapSurface {
    type Handle;

    fn add_marker(&mut self, spec: &MarkerSpec) -> Self::Handle;
    fn remove_marker(&mut self, handle: Self::Handle);
    fn bind_listeners(&mut self, id: &MarkerId, handle: &Self::Handle);
    fn unbind_listeners(&mut self, handle: &Self::Handle);
    fn open_popup(&mut self, handle: &Self::Handle);
    fn close_popup(&mut self, handle: &Self::Handle);
}

struct Entry<H> {
    handle: H,
    controller: MarkerController,
}

/// Owns the map surface and one popup controller per marker on it.
pub struct MarkerRegistry<S: MapSurface> {
    surface: S,
    markers: HashMap<MarkerId, Entry<S::Handle>>,
}

impl<S: MapSurface> MarkerRegistry<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            markers: HashMap::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn state(&self, id: &str) -> Option<MarkerState> {
        self.markers.get(id).map(|entry| entry.controller.state())
    }

    /// Put a marker on the map. An existing marker with the same id is torn
    /// down first, so the new one always starts idle.
    pub fn attach(&mut self, spec: MarkerSpec) -> MarkerId {
        let id = MarkerId::from(spec.id.as_str());
        if self.detach(id.as_str()) {
            tracing::debug!("Replacing marker {}", id);
        }

        let handle = self.surface.add_marker(&spec);
        self.surface.bind_listeners(&id, &handle);
        self.markers.insert(
            id.clone(),
            Entry {
                handle,
                controller: MarkerController::new(),
            },
        );
        id
    }

    /// Remove a marker. Listeners go first so no event can reach a marker
    /// that is already off the map.
    pub fn detach(&mut self, id: &str) -> bool {
        let Some(entry) = self.markers.remove(id) else {
            return false;
        };
        self.surface.unbind_listeners(&entry.handle);
        self.surface.remove_marker(entry.handle);
        true
    }

    pub fn clear(&mut self) {
        let ids: Vec<MarkerId> = self.markers.keys().cloned().collect();
        for id in ids {
            self.detach(id.as_str());
        }
    }

    /// Swap the whole marker set, e.g. after the report list is refetched.
    pub fn replace_all<I>(&mut self, specs: I)
    where
        I: IntoIterator<Item = MarkerSpec>,
    {
        self.clear();
        for spec in specs {
            self.attach(spec);
        }
        tracing::debug!("Map now shows {} markers", self.markers.len());
    }

    /// Feed a surface event to its marker. Events for ids that are not on the
    /// map are dropped.
    pub fn dispatch(&mut self, id: &str, event: MarkerEvent) -> Option<MarkerState> {
        let entry = self.markers.get_mut(id)?;
        match entry.controller.handle(event) {
            Some(PopupCommand::Open) => self.surface.open_popup(&entry.handle),
            Some(PopupCommand::Close) => self.surface.close_popup(&entry.handle),
            None => {}
        }
        Some(entry.controller.state())
    }
}

impl<S: MapSurface> Drop for MarkerRegistry<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    // No glob: `Borrow` in scope breaks `RefCell::borrow` inference.
    use super::{MapSurface, MarkerId, MarkerRegistry};
    use crate::lifecycle::{MarkerEvent, MarkerState};
    use crate::overview::MarkerSpec;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(String),
        Remove(u32),
        Bind(String, u32),
        Unbind(u32),
        Open(u32),
        Close(u32),
    }

    #[derive(Default, Clone)]
    struct RecordingSurface {
        calls: Rc<RefCell<Vec<Call>>>,
        next: u32,
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl MapSurface for RecordingSurface {
        type Handle = u32;

        fn add_marker(&mut self, spec: &MarkerSpec) -> u32 {
            self.next += 1;
            self.calls.borrow_mut().push(Call::Add(spec.id.clone()));
            self.next
        }

        fn remove_marker(&mut self, handle: u32) {
            self.calls.borrow_mut().push(Call::Remove(handle));
        }

        fn bind_listeners(&mut self, id: &MarkerId, handle: &u32) {
            self.calls
                .borrow_mut()
                .push(Call::Bind(id.to_string(), *handle));
        }

        fn unbind_listeners(&mut self, handle: &u32) {
            self.calls.borrow_mut().push(Call::Unbind(*handle));
        }

        fn open_popup(&mut self, handle: &u32) {
            self.calls.borrow_mut().push(Call::Open(*handle));
        }

        fn close_popup(&mut self, handle: &u32) {
            self.calls.borrow_mut().push(Call::Close(*handle));
        }
    }

    fn spec(id: &str) -> MarkerSpec {
        MarkerSpec {
            id: id.to_string(),
            lat: 13.75,
            lng: 100.5,
            popup_html: format!("<b>{id}</b>"),
        }
    }

    #[test]
    fn attach_adds_then_binds() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        let id = registry.attach(spec("r1"));
        assert_eq!(id.as_str(), "r1");
        assert_eq!(registry.state("r1"), Some(MarkerState::IDLE));
        assert_eq!(
            registry.surface().calls(),
            vec![Call::Add("r1".into()), Call::Bind("r1".into(), 1)]
        );
    }

    #[test]
    fn detach_unbinds_before_removing() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        registry.attach(spec("r1"));
        assert!(registry.detach("r1"));
        assert!(!registry.detach("r1"));

        let calls = registry.surface().calls();
        assert_eq!(&calls[2..], &[Call::Unbind(1), Call::Remove(1)]);
        assert!(registry.is_empty());
    }

    #[test]
    fn dispatch_drives_the_popup() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        registry.attach(spec("r1"));

        registry.dispatch("r1", MarkerEvent::PointerEnter);
        registry.dispatch("r1", MarkerEvent::Click);
        let state = registry.dispatch("r1", MarkerEvent::PointerLeave).unwrap();
        assert!(state.pinned && !state.hovered);
        registry.dispatch("r1", MarkerEvent::PopupClose);

        let calls = registry.surface().calls();
        assert_eq!(&calls[2..], &[Call::Open(1), Call::Close(1)]);
        assert_eq!(registry.state("r1"), Some(MarkerState::IDLE));
    }

    #[test]
    fn unknown_marker_events_are_ignored() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        assert_eq!(registry.dispatch("ghost", MarkerEvent::Click), None);
        assert!(registry.surface().calls().is_empty());
    }

    #[test]
    fn reattaching_resets_state() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        registry.attach(spec("r1"));
        registry.dispatch("r1", MarkerEvent::Click);
        registry.attach(spec("r1"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.state("r1"), Some(MarkerState::IDLE));
        let calls = registry.surface().calls();
        assert!(calls.contains(&Call::Unbind(1)));
        assert!(calls.contains(&Call::Bind("r1".into(), 2)));
    }

    #[test]
    fn pinned_popup_on_one_marker_does_not_leak() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        registry.attach(spec("a"));
        registry.attach(spec("b"));
        registry.dispatch("a", MarkerEvent::Click);
        assert_eq!(registry.state("b"), Some(MarkerState::IDLE));
    }

    #[test]
    fn replace_all_swaps_the_set() {
        let mut registry = MarkerRegistry::new(RecordingSurface::default());
        registry.replace_all(vec![spec("a"), spec("b")]);
        registry.dispatch("a", MarkerEvent::Click);
        registry.replace_all(vec![spec("a"), spec("c")]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.state("a"), Some(MarkerState::IDLE));
        assert_eq!(registry.state("b"), None);
        assert!(registry.state("c").is_some());
    }

    #[test]
    fn drop_tears_everything_down() {
        let surface = RecordingSurface::default();
        let log = surface.calls.clone();
        {
            let mut registry = MarkerRegistry::new(surface);
            registry.attach(spec("a"));
            registry.attach(spec("b"));
        }
        let calls = log.borrow();
        for handle in [1, 2] {
            let unbind = calls.iter().position(|c| *c == Call::Unbind(handle)).unwrap();
            let remove = calls.iter().position(|c| *c == Call::Remove(handle)).unwrap();
            assert!(unbind < remove);
        }
    }
}
