use crate::domain::employee::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use crate::domain::payroll_run::{NewPayrollRun, PayrollRun, PayrollRunUpdate, RunId};
use crate::domain::payslip::{Payslip, PayslipUpdate};
use crate::domain::ports::StateRepositoryBox;
use crate::domain::state::AppState;
use crate::error::{PayrollError, Result};
use crate::infrastructure::seed::create_seed;
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Published once per mutation that changed the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    EmployeeAdded(EmployeeId),
    EmployeeUpdated(EmployeeId),
    EmployeeDeleted(EmployeeId),
    PayrollRunAdded(RunId),
    PayrollRunUpdated(RunId),
    PayrollRunDeleted(RunId),
    PayslipsAdded { count: usize },
    PayslipUpdated(String),
    PersistenceToggled(bool),
    Reset,
}

/// The record store: employees, payroll runs and payslips.
///
/// `PayrollStore` owns the application state and the repository it is
/// snapshotted to. A mutation holds the write lock from the moment it reads
/// the state until its snapshot has been saved, so multi-step operations
/// such as processing a run are applied one at a time and as a whole.
/// Observers get `StoreEvent`s through `subscribe`.
pub struct PayrollStore {
    state: RwLock<AppState>,
    repository: StateRepositoryBox,
    events: broadcast::Sender<StoreEvent>,
    seed: u32,
}

pub(super) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Overlays a saved snapshot on the seed state, top-level key by key.
fn merge_over_seed(snapshot: Value, seed: u32) -> Result<AppState> {
    let mut base = serde_json::to_value(create_seed(seed))?;
    match (&mut base, snapshot) {
        (Value::Object(defaults), Value::Object(saved)) => {
            defaults.extend(saved);
        }
        _ => {
            return Err(PayrollError::ValidationError(
                "Snapshot is not a JSON object".to_string(),
            ));
        }
    }
    Ok(serde_json::from_value(base)?)
}

impl PayrollStore {
    /// Opens the store.
    ///
    /// Uses the repository's snapshot when there is one, otherwise the seed
    /// data for `seed`. An unreadable snapshot is logged and ignored.
    pub async fn open(repository: StateRepositoryBox, seed: u32) -> Self {
        let state = match repository.load().await {
            Ok(Some(snapshot)) => match merge_over_seed(snapshot, seed) {
                Ok(state) => {
                    info!(employees = state.employees.len(), "Loaded saved state");
                    state
                }
                Err(e) => {
                    warn!("Failed to parse saved state: {}", e);
                    create_seed(seed)
                }
            },
            Ok(None) => {
                debug!(seed, "No saved state, starting from seed");
                create_seed(seed)
            }
            Err(e) => {
                warn!("Failed to load saved state: {}", e);
                create_seed(seed)
            }
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(state),
            repository,
            events,
            seed,
        }
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// A copy of the current state.
    pub async fn state(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// A copy of all employees, in stored order.
    pub async fn employees(&self) -> Vec<Employee> {
        self.state.read().await.employees.clone()
    }

    /// A copy of the run with `id`, if any.
    pub async fn payroll_run(&self, id: &str) -> Option<PayrollRun> {
        self.state.read().await.payroll_run(id).cloned()
    }

    pub async fn payslips_for_run(&self, run_id: &str) -> Vec<Payslip> {
        self.state
            .read()
            .await
            .payslips_for_run(run_id)
            .cloned()
            .collect()
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        if state.use_local_storage {
            self.repository.save(serde_json::to_value(state)?).await?;
        }
        Ok(())
    }

    /// Runs `change` on a copy of the state while holding the write lock.
    ///
    /// The copy becomes the live state only after it has been saved, and its
    /// events are published after that. When `change` fails or reports no
    /// events, nothing is saved and the live state is untouched.
    pub(super) async fn apply<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut AppState) -> Result<(T, Vec<StoreEvent>)>,
    {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let (value, events) = change(&mut next)?;
        if events.is_empty() {
            return Ok(value);
        }
        self.save(&next).await?;
        *state = next;
        for event in events {
            debug!(?event, "Store updated");
            // No receivers is not an error.
            let _ = self.events.send(event);
        }
        Ok(value)
    }

    /// Adds an employee under a fresh `emp-` id.
    pub async fn add_employee(&self, employee: NewEmployee) -> Result<Employee> {
        let employee = employee.into_employee(new_id("emp"));
        self.apply(|state| {
            state.employees.push(employee.clone());
            let event = StoreEvent::EmployeeAdded(employee.id.clone());
            Ok((employee, vec![event]))
        })
        .await
    }

    /// Applies `update` to the employee. `None` when the id is unknown.
    pub async fn update_employee(
        &self,
        id: &str,
        update: EmployeeUpdate,
    ) -> Result<Option<Employee>> {
        self.apply(|state| {
            let Some(employee) = state.employees.iter_mut().find(|e| e.id == id) else {
                return Ok((None, vec![]));
            };
            update.apply(employee);
            let event = StoreEvent::EmployeeUpdated(employee.id.clone());
            Ok((Some(employee.clone()), vec![event]))
        })
        .await
    }

    /// Payroll runs that reference the employee are left as they are.
    pub async fn delete_employee(&self, id: &str) -> Result<bool> {
        self.apply(|state| {
            let before = state.employees.len();
            state.employees.retain(|e| e.id != id);
            if state.employees.len() == before {
                return Ok((false, vec![]));
            }
            Ok((true, vec![StoreEvent::EmployeeDeleted(id.to_string())]))
        })
        .await
    }

    /// Adds a run under a fresh `run-` id.
    pub async fn add_payroll_run(&self, run: NewPayrollRun) -> Result<PayrollRun> {
        let run = run.into_run(new_id("run"));
        self.apply(|state| {
            state.payroll_runs.push(run.clone());
            let event = StoreEvent::PayrollRunAdded(run.id.clone());
            Ok((run, vec![event]))
        })
        .await
    }

    /// Applies `update` to the run. `None` when the id is unknown.
    pub async fn update_payroll_run(
        &self,
        id: &str,
        update: PayrollRunUpdate,
    ) -> Result<Option<PayrollRun>> {
        self.apply(|state| {
            let Some(run) = state.payroll_runs.iter_mut().find(|r| r.id == id) else {
                return Ok((None, vec![]));
            };
            update.apply(run);
            let event = StoreEvent::PayrollRunUpdated(run.id.clone());
            Ok((Some(run.clone()), vec![event]))
        })
        .await
    }

    /// Removes the run and every payslip filed under its id.
    ///
    /// Payslips are removed even when no run has that id. Returns whether a
    /// run was removed.
    pub async fn delete_payroll_run(&self, id: &str) -> Result<bool> {
        self.apply(|state| {
            let runs = state.payroll_runs.len();
            let payslips = state.payslips.len();
            state.payroll_runs.retain(|r| r.id != id);
            state.payslips.retain(|p| p.payroll_run_id != id);

            let removed_run = state.payroll_runs.len() != runs;
            if !removed_run && state.payslips.len() == payslips {
                return Ok((false, vec![]));
            }
            Ok((removed_run, vec![StoreEvent::PayrollRunDeleted(id.to_string())]))
        })
        .await
    }

    /// Stores payslips, replacing any already held under the same id.
    pub async fn add_payslips(&self, payslips: Vec<Payslip>) -> Result<()> {
        self.apply(|state| {
            let count = state.replace_payslips(payslips);
            Ok(((), vec![StoreEvent::PayslipsAdded { count }]))
        })
        .await
    }

    /// Applies `update` to the payslip. `None` when the id is unknown.
    pub async fn update_payslip(
        &self,
        id: &str,
        update: PayslipUpdate,
    ) -> Result<Option<Payslip>> {
        self.apply(|state| {
            let Some(payslip) = state.payslips.iter_mut().find(|p| p.id == id) else {
                return Ok((None, vec![]));
            };
            update.apply(payslip);
            let event = StoreEvent::PayslipUpdated(payslip.id.clone());
            Ok((Some(payslip.clone()), vec![event]))
        })
        .await
    }

    /// Flips snapshotting on or off. Turning it off deletes the snapshot.
    ///
    /// The flag only changes once the repository call has succeeded.
    pub async fn toggle_persistence(&self) -> Result<bool> {
        let mut state = self.state.write().await;
        let enabled = !state.use_local_storage;
        if enabled {
            let mut next = state.clone();
            next.use_local_storage = true;
            self.save(&next).await?;
        } else {
            self.repository.clear().await?;
        }
        state.use_local_storage = enabled;
        info!(enabled, "Persistence toggled");
        let _ = self.events.send(StoreEvent::PersistenceToggled(enabled));
        Ok(enabled)
    }

    /// Replaces everything with seed data, for `seed` or the store's own.
    pub async fn reset_to_seed(&self, seed: Option<u32>) -> Result<()> {
        let seed = seed.unwrap_or(self.seed);
        self.apply(|state| {
            *state = create_seed(seed);
            Ok(((), vec![StoreEvent::Reset]))
        })
        .await?;
        info!(seed, "Store reset to seed");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::ports::StateRepository;
    use crate::error::{PayrollError, Result};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::time::Duration;

    /// Starts empty and keeps nothing, pausing on every save.
    pub struct SlowRepository(pub Duration);

    #[async_trait]
    impl StateRepository for SlowRepository {
        async fn load(&self) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn save(&self, _snapshot: Value) -> Result<()> {
            tokio::time::sleep(self.0).await;
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Starts empty and rejects every write.
    pub struct FailingRepository;

    fn disk_full() -> PayrollError {
        PayrollError::IoError(std::io::Error::other("disk full"))
    }

    #[async_trait]
    impl StateRepository for FailingRepository {
        async fn load(&self) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn save(&self, _snapshot: Value) -> Result<()> {
            Err(disk_full())
        }

        async fn clear(&self) -> Result<()> {
            Err(disk_full())
        }
    }
}
