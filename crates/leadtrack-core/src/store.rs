//! # Lead Store
//!
//! The authoritative lead collection. It changes only through two
//! operations:
//!
//! - [`LeadStore::create_or_update`]: append a new lead, or replace every
//!   field of an existing one
//! - [`LeadStore::set_stage`]: move one lead to another stage
//!
//! Both are silent no-ops when they cannot apply (missing name/company,
//! unknown id). Neither ever reorders the collection. After each successful
//! write, subscribed [`ChangeHook`]s receive the recomputed overdue set.
//!
//! There is no delete. A lead lives for the whole session.

use crate::notify::{ChangeEvent, ChangeHook, ChangeKind};
use crate::query::{self, LeadQuery, StageCounts};
use crate::reminder::{Clock, SystemClock};
use crate::storage::LeadRepository;
use crate::system::Stage;
use crate::{Lead, LeadError, LeadFields, LeadId};
use chrono::NaiveDate;

/// The first id handed out by an empty store.
const FIRST_ID: LeadId = LeadId(1);

/// In-memory lead register.
pub struct LeadStore {
    /// Leads in insertion order.
    leads: Vec<Lead>,
    /// Next id to hand out. Only ever grows.
    /// `None` once every id has been handed out.
    next_id: Option<LeadId>,
    /// Source of "today" for overdue evaluation.
    clock: Box<dyn Clock>,
    /// Change subscribers, notified in order.
    hooks: Vec<Box<dyn ChangeHook>>,
}

impl std::fmt::Debug for LeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadStore")
            .field("leads", &self.leads)
            .field("next_id", &self.next_id)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadStore {
    /// Create an empty store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store with a specific clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            leads: Vec::new(),
            next_id: Some(FIRST_ID),
            clock: Box::new(clock),
            hooks: Vec::new(),
        }
    }

    /// Rebuild a store from previously saved leads.
    ///
    /// Leads failing the presence check and repeated ids are dropped so the
    /// store invariants hold. New ids continue after the highest loaded id.
    #[must_use]
    pub fn from_leads(leads: Vec<Lead>, clock: impl Clock + 'static) -> Self {
        let mut store = Self::with_clock(clock);
        for lead in leads {
            if !lead.fields.is_valid() || store.get(lead.id).is_some() {
                continue;
            }
            if store.next_id.is_some_and(|next| lead.id >= next) {
                store.next_id = lead.id.next();
            }
            store.leads.push(lead);
        }
        store
    }

    /// Load a store through a persistence collaborator.
    pub fn load_from(
        repo: &impl LeadRepository,
        clock: impl Clock + 'static,
    ) -> Result<Self, LeadError> {
        Ok(Self::from_leads(repo.load_all()?, clock))
    }

    /// Hand the current collection to a persistence collaborator.
    pub fn save_to(&self, repo: &mut impl LeadRepository) -> Result<(), LeadError> {
        repo.save_all(&self.leads)
    }

    /// Register a change hook. Hooks run after every successful write.
    pub fn subscribe(&mut self, hook: impl ChangeHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create a lead, or replace the fields of `target` if it exists.
    ///
    /// Returns the id written, or `None` when `name` or `company` is blank
    /// or no unused id is left. A `target` that matches no lead creates a
    /// new one.
    pub fn create_or_update(
        &mut self,
        fields: LeadFields,
        target: Option<LeadId>,
    ) -> Option<LeadId> {
        if !fields.is_valid() {
            return None;
        }

        let existing = target.and_then(|id| self.position(id));
        let (id, kind) = match existing {
            Some(index) => {
                let lead = &mut self.leads[index];
                lead.fields = fields;
                (lead.id, ChangeKind::Updated)
            }
            None => {
                let id = self.allocate_id()?;
                self.leads.push(Lead::new(id, fields));
                (id, ChangeKind::Created)
            }
        };

        self.notify(kind, id);
        Some(id)
    }

    /// Move a lead to `stage`. Returns `false` when `id` is unknown.
    pub fn set_stage(&mut self, id: LeadId, stage: Stage) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.leads[index].fields.stage = stage;
        self.notify(ChangeKind::StageChanged, id);
        true
    }

    fn allocate_id(&mut self) -> Option<LeadId> {
        let id = self.next_id?;
        self.next_id = id.next();
        Some(id)
    }

    fn position(&self, id: LeadId) -> Option<usize> {
        self.leads.iter().position(|lead| lead.id == id)
    }

    fn notify(&mut self, kind: ChangeKind, id: LeadId) {
        if self.hooks.is_empty() {
            return;
        }
        let Self {
            leads,
            clock,
            hooks,
            ..
        } = self;

        let today = clock.today();
        let event = ChangeEvent {
            kind,
            id,
            total: leads.len(),
            today,
            overdue: query::overdue_leads(leads.as_slice(), today),
        };
        for hook in hooks.iter_mut() {
            hook.leads_changed(&event);
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Look up a lead by id.
    #[must_use]
    pub fn get(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// All leads in insertion order.
    #[must_use]
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Today according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Leads passing `query`, in insertion order.
    #[must_use]
    pub fn filtered_leads(&self, query: &LeadQuery) -> Vec<&Lead> {
        query::filtered_leads(&self.leads, query)
    }

    /// Per-stage counts in pipeline order.
    #[must_use]
    pub fn counts_by_stage(&self) -> StageCounts {
        query::counts_by_stage(&self.leads)
    }

    /// Leads due for follow-up as of the store's clock.
    #[must_use]
    pub fn overdue_leads(&self) -> Vec<&Lead> {
        query::overdue_leads(&self.leads, self.today())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::FixedClock;
    use crate::storage::MemoryRepository;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    type Log = Rc<RefCell<Vec<(ChangeKind, usize, usize)>>>;

    struct Recorder(Log);

    impl ChangeHook for Recorder {
        fn leads_changed(&mut self, event: &ChangeEvent<'_>) {
            self.0
                .borrow_mut()
                .push((event.kind, event.total, event.overdue.len()));
        }
    }

    fn store() -> LeadStore {
        LeadStore::with_clock(FixedClock(date(2024, 6, 1)))
    }

    #[test]
    fn create_appends_with_fresh_ids() {
        let mut store = store();
        let a = store
            .create_or_update(LeadFields::new("Alice", "Acme"), None)
            .expect("create");
        let b = store
            .create_or_update(LeadFields::new("Bob", "Initech"), None)
            .expect("create");

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.leads()[0].id, a);
        assert_eq!(store.leads()[1].id, b);
    }

    #[test]
    fn blank_required_fields_are_a_no_op() {
        let mut store = store();
        assert_eq!(store.create_or_update(LeadFields::new("", "Acme"), None), None);
        assert_eq!(store.create_or_update(LeadFields::new("Alice", " "), None), None);
        assert!(store.is_empty());
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let mut store = store();
        let a = store
            .create_or_update(LeadFields::new("Alice", "Acme"), None)
            .expect("create");
        let b = store
            .create_or_update(LeadFields::new("Bob", "Initech"), None)
            .expect("create");

        let updated = store.create_or_update(
            LeadFields::new("Alicia", "Acme Corp").with_stage(Stage::Meeting),
            Some(a),
        );

        assert_eq!(updated, Some(a));
        assert_eq!(store.len(), 2);
        assert_eq!(store.leads()[0].id, a);
        assert_eq!(store.leads()[0].name(), "Alicia");
        assert_eq!(store.leads()[0].stage(), Stage::Meeting);
        assert_eq!(store.leads()[1].id, b);
    }

    #[test]
    fn unknown_target_creates() {
        let mut store = store();
        let id = store
            .create_or_update(LeadFields::new("Alice", "Acme"), Some(LeadId(99)))
            .expect("create");
        assert_ne!(id, LeadId(99));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_stage_unknown_id_is_no_op() {
        let mut store = store();
        store.create_or_update(LeadFields::new("Alice", "Acme"), None);
        let before = store.leads().to_vec();

        assert!(!store.set_stage(LeadId(42), Stage::Lost));
        assert_eq!(store.leads(), before.as_slice());
    }

    #[test]
    fn ids_are_never_reused_after_reload() {
        let mut store = store();
        store.create_or_update(LeadFields::new("Alice", "Acme"), None);
        store.create_or_update(LeadFields::new("Bob", "Initech"), None);

        let mut repo = MemoryRepository::new();
        store.save_to(&mut repo).expect("save");

        let mut reloaded =
            LeadStore::load_from(&repo, FixedClock(date(2024, 6, 1))).expect("load");
        let c = reloaded
            .create_or_update(LeadFields::new("Carol", "Globex"), None)
            .expect("create");
        assert_eq!(c, LeadId(3));
    }

    #[test]
    fn from_leads_drops_invalid_and_duplicate_records() {
        let leads = vec![
            Lead::new(LeadId(5), LeadFields::new("Alice", "Acme")),
            Lead::new(LeadId(5), LeadFields::new("Dup", "Dup Inc")),
            Lead::new(LeadId(9), LeadFields::new("", "Nameless")),
        ];
        let store = LeadStore::from_leads(leads, FixedClock(date(2024, 6, 1)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(LeadId(5)).map(Lead::name), Some("Alice"));
    }

    #[test]
    fn exhausted_id_space_refuses_to_create() {
        let leads = vec![Lead::new(LeadId(u64::MAX), LeadFields::new("Alice", "Acme"))];
        let mut store = LeadStore::from_leads(leads, FixedClock(date(2024, 6, 1)));

        assert_eq!(
            store.create_or_update(LeadFields::new("Bob", "Initech"), None),
            None
        );
        assert_eq!(store.len(), 1);

        // Updates of the existing lead still go through.
        let updated = store.create_or_update(
            LeadFields::new("Carol", "Acme"),
            Some(LeadId(u64::MAX)),
        );
        assert_eq!(updated, Some(LeadId(u64::MAX)));
        assert_eq!(store.leads().iter().map(Lead::name).collect::<Vec<_>>(), ["Carol"]);
    }

    #[test]
    fn hooks_fire_only_on_successful_writes() {
        let events: Log = Rc::default();
        let mut store = store();
        store.subscribe(Recorder(Rc::clone(&events)));

        store.create_or_update(LeadFields::new("", ""), None);
        let a = store
            .create_or_update(
                LeadFields::new("Alice", "Acme").with_reminder(date(2024, 1, 1)),
                None,
            )
            .expect("create");
        store.set_stage(LeadId(77), Stage::Lost);
        store.set_stage(a, Stage::Calling);
        store.create_or_update(LeadFields::new("Alice", "Acme"), Some(a));

        assert_eq!(
            *events.borrow(),
            vec![
                (ChangeKind::Created, 1, 1),
                (ChangeKind::StageChanged, 1, 1),
                (ChangeKind::Updated, 1, 0),
            ]
        );
    }

    #[test]
    fn overdue_follows_store_clock() {
        let mut store = store();
        store.create_or_update(
            LeadFields::new("Alice", "Acme").with_reminder(date(2024, 6, 1)),
            None,
        );
        store.create_or_update(
            LeadFields::new("Bob", "Initech").with_reminder(date(2024, 6, 2)),
            None,
        );

        let overdue: Vec<&str> = store.overdue_leads().iter().map(|l| l.name()).collect();
        assert_eq!(overdue, vec!["Alice"]);
    }
}
