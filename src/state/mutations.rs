//! Mutation application.

use crate::error::{Result, TrackerError};
use crate::types::{
    Communication, CommunicationId, CommunicationMethod, Company, CompanyId, MethodId, Settings,
    StoreState,
};
use serde::{Deserialize, Serialize};

/// A state transition, one tagged variant per mutation kind.
///
/// Every change to the store flows through [`apply_mutation`], which keeps
/// transitions centrally auditable and testable without a store handle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Mutation {
    AddCompany(Company),
    UpdateCompany(Company),
    DeleteCompany(CompanyId),
    AddMethod(CommunicationMethod),
    UpdateMethod(CommunicationMethod),
    DeleteMethod(MethodId),
    LogCommunication(Communication),
    UpdateCommunication(Communication),
    DeleteCommunication(CommunicationId),
    UpdateSettings(Settings),
    /// Replace the entire store (snapshot restore / import).
    LoadState(StoreState),
}

/// Apply a mutation to a store state, producing the successor state.
///
/// The input is consumed and the successor returned whole, so callers swap
/// complete snapshots and no partial update is ever visible. Mutations that
/// target an absent id fail with the matching not-found error and the caller
/// keeps its current state.
pub fn apply_mutation(state: StoreState, mutation: Mutation) -> Result<StoreState> {
    let mut next = state;

    match mutation {
        Mutation::AddCompany(company) => {
            next.companies.push(company);
        }

        Mutation::UpdateCompany(company) => {
            let slot = next
                .companies
                .iter_mut()
                .find(|c| c.id == company.id)
                .ok_or(TrackerError::CompanyNotFound(company.id))?;
            *slot = company;
        }

        Mutation::DeleteCompany(id) => {
            if next.company(id).is_none() {
                return Err(TrackerError::CompanyNotFound(id));
            }
            // Cascade: the company and every communication that references
            // it leave in the same transition, so no orphan is ever visible.
            next.companies.retain(|c| c.id != id);
            next.communications.retain(|c| c.company_id != id);
        }

        Mutation::AddMethod(method) => {
            next.communication_methods.push(method);
        }

        Mutation::UpdateMethod(method) => {
            let slot = next
                .communication_methods
                .iter_mut()
                .find(|m| m.id == method.id)
                .ok_or(TrackerError::MethodNotFound(method.id))?;
            *slot = method;
        }

        Mutation::DeleteMethod(id) => {
            if next.method(id).is_none() {
                return Err(TrackerError::MethodNotFound(id));
            }
            // No cascade: communications keep the method name as a snapshot.
            next.communication_methods.retain(|m| m.id != id);
        }

        Mutation::LogCommunication(communication) => {
            next.communications.push(communication);
        }

        Mutation::UpdateCommunication(communication) => {
            let slot = next
                .communications
                .iter_mut()
                .find(|c| c.id == communication.id)
                .ok_or(TrackerError::CommunicationNotFound(communication.id))?;
            *slot = communication;
        }

        Mutation::DeleteCommunication(id) => {
            if next.communication(id).is_none() {
                return Err(TrackerError::CommunicationNotFound(id));
            }
            next.communications.retain(|c| c.id != id);
        }

        Mutation::UpdateSettings(settings) => {
            next.settings = settings;
        }

        Mutation::LoadState(state) => {
            return Ok(state);
        }
    }

    Ok(next)
}
