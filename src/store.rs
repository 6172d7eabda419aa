//! Main Store struct tying all components together.

use crate::aggregate::{dashboard_counts, DashboardCounts};
use crate::error::{Result, TrackerError};
use crate::reports;
use crate::seed::seed_state;
use crate::snapshot;
use crate::state::{apply_mutation, Mutation};
use crate::status::{self, CompanyStatus};
use crate::subscriptions::{
    StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{
    Communication, CommunicationId, CommunicationMethod, Company, CompanyId, MethodId, NewCompany,
    NewCommunication, NewMethod, Settings, StoreState,
};
use chrono::{Local, NaiveDate};
use parking_lot::RwLock;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory holding the snapshot and lock files.
    pub path: PathBuf,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./cadence"),
            create_if_missing: true,
        }
    }
}

/// The record store: single source of truth for companies, communication
/// methods, and communications.
///
/// All mutations validate first, then flow through one typed dispatch
/// ([`Mutation`]) that swaps a complete [`StoreState`] snapshot, notifies
/// subscribers, and mirrors the state to disk. Derived views (status,
/// dashboard, calendar, analytics, reports) are always recomputed from the
/// current state with an explicit evaluation date, never cached.
pub struct Store {
    /// Store configuration.
    config: StoreConfig,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// Current state; replaced wholesale on every mutation.
    state: RwLock<StoreState>,

    /// Subscription manager.
    subscriptions: SubscriptionManager,

    // Id counters, seeded from the loaded snapshot's maxima.
    next_company_id: AtomicU64,
    next_method_id: AtomicU64,
    next_communication_id: AtomicU64,
}

impl Store {
    /// Open an existing store or create a new one seeded with the starter
    /// dataset.
    pub fn open_or_create(config: StoreConfig) -> Result<Self> {
        if config.path.join(snapshot::SNAPSHOT_FILE).exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create(config)
        } else {
            Err(TrackerError::NotInitialized)
        }
    }

    /// Create a new store with the seed dataset and write its first
    /// snapshot.
    pub fn create(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.path)?;
        let lock_file = snapshot::acquire_lock(&config.path)?;

        let state = seed_state(Local::now().date_naive());
        let store = Self::assemble(config, lock_file, state);
        store.mirror(&store.state.read());
        Ok(store)
    }

    /// Open an existing store, falling back to the seed dataset when the
    /// snapshot is missing or unreadable.
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.path)?;
        let lock_file = snapshot::acquire_lock(&config.path)?;

        let state = snapshot::load_or_seed(&config.path, Local::now().date_naive());
        Ok(Self::assemble(config, lock_file, state))
    }

    fn assemble(config: StoreConfig, lock_file: File, state: StoreState) -> Self {
        let (companies, methods, communications) = next_ids(&state);
        Self {
            config,
            _lock_file: lock_file,
            state: RwLock::new(state),
            subscriptions: SubscriptionManager::new(),
            next_company_id: AtomicU64::new(companies),
            next_method_id: AtomicU64::new(methods),
            next_communication_id: AtomicU64::new(communications),
        }
    }

    // --- Subscriptions ---

    /// Subscribe to store events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Unsubscribe.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id)
    }

    // --- Company Mutations ---

    /// Add a company. The periodicity defaults to the settings value when
    /// the input leaves it unset.
    pub fn add_company(&self, new: NewCompany) -> Result<Company> {
        let periodicity = new
            .periodicity
            .unwrap_or_else(|| self.state.read().settings.default_communication_period);
        validate_company_fields(&new.name, periodicity)?;

        let company = Company {
            id: CompanyId(self.next_company_id.fetch_add(1, Ordering::SeqCst)),
            name: new.name,
            communication_periodicity: periodicity,
            linkedin_profile: new.linkedin_profile,
            emails: new.emails,
            phone_numbers: new.phone_numbers,
            comments: new.comments,
        };

        self.commit(Mutation::AddCompany(company.clone()))?;
        Ok(company)
    }

    /// Replace a company record wholesale, keyed by its id.
    pub fn update_company(&self, company: Company) -> Result<()> {
        validate_company_fields(&company.name, company.communication_periodicity)?;
        self.commit(Mutation::UpdateCompany(company))?;
        Ok(())
    }

    /// Delete a company and, atomically, every communication that
    /// references it. Returns the number of cascaded communications.
    pub fn delete_company(&self, id: CompanyId) -> Result<usize> {
        match self.commit(Mutation::DeleteCompany(id))? {
            StoreEvent::CompanyDeleted {
                cascaded_communications,
                ..
            } => Ok(cascaded_communications),
            _ => Ok(0),
        }
    }

    // --- Method Mutations ---

    /// Add a communication method. The sequence defaults to one past the
    /// current method count.
    pub fn add_method(&self, new: NewMethod) -> Result<CommunicationMethod> {
        if new.name.trim().is_empty() {
            return Err(TrackerError::Validation(
                "method name is required".to_string(),
            ));
        }

        let sequence = new
            .sequence
            .unwrap_or_else(|| self.state.read().communication_methods.len() as i64 + 1);

        let method = CommunicationMethod {
            id: MethodId(self.next_method_id.fetch_add(1, Ordering::SeqCst)),
            name: new.name,
            description: new.description,
            sequence,
            mandatory: new.mandatory,
        };

        self.commit(Mutation::AddMethod(method.clone()))?;
        Ok(method)
    }

    /// Replace a method record wholesale, keyed by its id.
    pub fn update_method(&self, method: CommunicationMethod) -> Result<()> {
        if method.name.trim().is_empty() {
            return Err(TrackerError::Validation(
                "method name is required".to_string(),
            ));
        }
        self.commit(Mutation::UpdateMethod(method))?;
        Ok(())
    }

    /// Delete a method. Historical communications keep the method name
    /// they recorded.
    pub fn delete_method(&self, id: MethodId) -> Result<()> {
        self.commit(Mutation::DeleteMethod(id))?;
        Ok(())
    }

    // --- Communication Mutations ---

    /// Log a communication against an existing company.
    pub fn log_communication(&self, new: NewCommunication) -> Result<Communication> {
        validate_communication_fields(&new.method)?;
        self.require_company(new.company_id)?;

        let communication = Communication {
            id: CommunicationId(self.next_communication_id.fetch_add(1, Ordering::SeqCst)),
            company_id: new.company_id,
            date: new.date,
            method: new.method,
            notes: new.notes,
            status: new.status,
            response_date: new.response_date,
        };

        self.commit(Mutation::LogCommunication(communication.clone()))?;
        Ok(communication)
    }

    /// Replace a communication record wholesale, keyed by its id.
    pub fn update_communication(&self, communication: Communication) -> Result<()> {
        validate_communication_fields(&communication.method)?;
        self.require_company(communication.company_id)?;
        self.commit(Mutation::UpdateCommunication(communication))?;
        Ok(())
    }

    /// Delete a communication.
    pub fn delete_communication(&self, id: CommunicationId) -> Result<()> {
        self.commit(Mutation::DeleteCommunication(id))?;
        Ok(())
    }

    // --- Store-wide Mutations ---

    /// Replace the settings.
    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        if settings.default_communication_period == 0 {
            return Err(TrackerError::Validation(
                "default communication period must be at least one day".to_string(),
            ));
        }
        self.commit(Mutation::UpdateSettings(settings))?;
        Ok(())
    }

    /// Replace the entire store (snapshot restore).
    pub fn load_state(&self, state: StoreState) -> Result<()> {
        let (companies, methods, communications) = next_ids(&state);
        self.commit(Mutation::LoadState(state))?;

        // Counters must clear the incoming ids; the old collections are gone.
        self.next_company_id.store(companies, Ordering::SeqCst);
        self.next_method_id.store(methods, Ordering::SeqCst);
        self.next_communication_id
            .store(communications, Ordering::SeqCst);
        Ok(())
    }

    /// Import a previously exported snapshot document. Rejected atomically
    /// on any parse or shape error; current state is untouched.
    pub fn import_json(&self, raw: &str) -> Result<()> {
        let state = snapshot::parse_snapshot(raw)?;
        self.load_state(state)
    }

    /// Export the store as a snapshot document. A later
    /// [`Store::import_json`] of this text restores the identical state.
    pub fn export_json(&self) -> Result<String> {
        snapshot::to_json(&self.state.read())
    }

    // --- Queries ---

    /// Current state, cloned. Derived views recompute from this.
    pub fn state(&self) -> StoreState {
        self.state.read().clone()
    }

    /// Company-level status at `today`; `None` for an unknown id.
    pub fn company_status(&self, id: CompanyId, today: NaiveDate) -> Option<CompanyStatus> {
        status::company_status(&self.state.read(), id, today)
    }

    /// A company's communications, most recent first.
    pub fn company_communications(&self, id: CompanyId) -> Vec<Communication> {
        status::company_communications(&self.state.read(), id)
    }

    /// Dashboard summary counts at `today`.
    pub fn dashboard_counts(&self, today: NaiveDate) -> DashboardCounts {
        dashboard_counts(&self.state.read(), today)
    }

    /// Detailed communication log report at `today`.
    pub fn detailed_report(&self, today: NaiveDate) -> String {
        reports::detailed_report(&self.state.read(), today)
    }

    /// Per-company summary report at `today`.
    pub fn summary_report(&self, today: NaiveDate) -> String {
        reports::summary_report(&self.state.read(), today)
    }

    // --- Internals ---

    fn require_company(&self, id: CompanyId) -> Result<()> {
        if self.state.read().company(id).is_none() {
            return Err(TrackerError::CompanyNotFound(id));
        }
        Ok(())
    }

    /// Apply a mutation: swap the snapshot under the write lock, then
    /// notify subscribers and mirror to disk outside it.
    fn commit(&self, mutation: Mutation) -> Result<StoreEvent> {
        let mirrored;
        let event;
        {
            let mut guard = self.state.write();
            event = event_for(&guard, &mutation);
            let next = apply_mutation(guard.clone(), mutation)?;
            *guard = next;
            mirrored = guard.clone();
        }

        self.subscriptions.broadcast(event.clone());
        self.mirror(&mirrored);
        Ok(event)
    }

    /// Best-effort persistence mirror: a failed write is reported, not
    /// raised, and the in-memory store keeps serving.
    fn mirror(&self, state: &StoreState) {
        if let Err(err) = snapshot::write_snapshot(&self.config.path, state) {
            tracing::warn!(
                path = %self.config.path.display(),
                %err,
                "snapshot mirror failed; continuing in memory"
            );
        }
    }
}

/// Next-id counter values covering every id in `state`.
fn next_ids(state: &StoreState) -> (u64, u64, u64) {
    let max_company = state.companies.iter().map(|c| c.id.0).max().unwrap_or(0);
    let max_method = state
        .communication_methods
        .iter()
        .map(|m| m.id.0)
        .max()
        .unwrap_or(0);
    let max_communication = state
        .communications
        .iter()
        .map(|c| c.id.0)
        .max()
        .unwrap_or(0);
    (max_company + 1, max_method + 1, max_communication + 1)
}

fn validate_company_fields(name: &str, periodicity: u32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TrackerError::Validation(
            "company name is required".to_string(),
        ));
    }
    if periodicity == 0 {
        return Err(TrackerError::Validation(
            "communication periodicity must be at least one day".to_string(),
        ));
    }
    Ok(())
}

fn validate_communication_fields(method: &str) -> Result<()> {
    if method.trim().is_empty() {
        return Err(TrackerError::Validation(
            "communication method is required".to_string(),
        ));
    }
    Ok(())
}

/// Describe a mutation as a subscriber event, against the pre-mutation
/// state (cascade counts need it).
fn event_for(state: &StoreState, mutation: &Mutation) -> StoreEvent {
    match mutation {
        Mutation::AddCompany(company) => StoreEvent::CompanyAdded {
            company: company.clone(),
        },
        Mutation::UpdateCompany(company) => StoreEvent::CompanyUpdated {
            company: company.clone(),
        },
        Mutation::DeleteCompany(id) => StoreEvent::CompanyDeleted {
            id: *id,
            cascaded_communications: state
                .communications
                .iter()
                .filter(|c| c.company_id == *id)
                .count(),
        },
        Mutation::AddMethod(method) => StoreEvent::MethodAdded {
            method: method.clone(),
        },
        Mutation::UpdateMethod(method) => StoreEvent::MethodUpdated {
            method: method.clone(),
        },
        Mutation::DeleteMethod(id) => StoreEvent::MethodDeleted { id: *id },
        Mutation::LogCommunication(communication) => StoreEvent::CommunicationLogged {
            communication: communication.clone(),
        },
        Mutation::UpdateCommunication(communication) => StoreEvent::CommunicationUpdated {
            communication: communication.clone(),
        },
        Mutation::DeleteCommunication(id) => StoreEvent::CommunicationDeleted { id: *id },
        Mutation::UpdateSettings(settings) => StoreEvent::SettingsUpdated {
            settings: settings.clone(),
        },
        Mutation::LoadState(_) => StoreEvent::StateLoaded,
    }
}
