//! Movement recorders.
//!
//! Each recorder validates its request, then runs one transaction:
//! lock the asset row, re-check the asset rules, insert the history row,
//! update the asset, and post every ledger delta. Any error after BEGIN
//! drops the transaction, which rolls everything back. The audit event is
//! written only after COMMIT and never affects the outcome.

use chrono::Utc;
use domain::models::{
    Asset, AssetStatus, Assignment, CreateAuditLogInput, Expenditure, Principal, Purchase, Role,
    Transfer,
};
use domain::models::assignment::AssignAssetRequest;
use domain::models::expenditure::RecordExpenditureRequest;
use domain::models::purchase::RecordPurchaseRequest;
use domain::models::transfer::RecordTransferRequest;
use domain::services::{
    assignment_postings, audit_helpers, check_assignable, check_expendable, check_transfer_source,
    expenditure_postings, lock_order, purchase_postings, require_role, transfer_postings,
    LedgerPosting,
    MovementRejection, RejectionKind, ScopeError,
};
use persistence::entities::AssetStatusDb;
use persistence::repositories::{
    AssetRepository, AssignmentRepository, AuditLogRepository, BalanceRepository,
    BaseRepository, ExpenditureRepository, PurchaseRepository, TransferRepository,
    UserRepository,
};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::record_movement;

/// Roles allowed to record purchases and transfers.
pub const PROCUREMENT_ROLES: &[Role] = &[Role::Admin, Role::LogisticsOfficer];

/// Why a movement was not recorded.
#[derive(Debug, Error)]
pub enum MovementError {
    #[error(transparent)]
    Rejected(#[from] MovementRejection),

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("Failed to update asset balances: {0}")]
    BalanceUpdateFailed(sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MovementError> for ApiError {
    fn from(err: MovementError) -> Self {
        match err {
            MovementError::Rejected(rejection) => {
                let message = rejection.to_string();
                match rejection.kind() {
                    RejectionKind::Validation => ApiError::Validation(message),
                    RejectionKind::NotFound => ApiError::NotFound(message),
                    RejectionKind::Forbidden => ApiError::Forbidden(message),
                }
            }
            MovementError::Scope(e) => e.into(),
            MovementError::BalanceUpdateFailed(e) => {
                ApiError::Internal(format!("Failed to update asset balances: {}", e))
            }
            MovementError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
        }
    }
}

/// Records purchases, transfers, assignments and expenditures.
#[derive(Clone)]
pub struct MovementService {
    pool: PgPool,
    assets: AssetRepository,
    bases: BaseRepository,
    users: UserRepository,
    purchases: PurchaseRepository,
    transfers: TransferRepository,
    assignments: AssignmentRepository,
    expenditures: ExpenditureRepository,
    balances: BalanceRepository,
    audit: AuditLogRepository,
}

impl MovementService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            assets: AssetRepository::new(pool.clone()),
            bases: BaseRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            purchases: PurchaseRepository::new(pool.clone()),
            transfers: TransferRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            expenditures: ExpenditureRepository::new(pool.clone()),
            balances: BalanceRepository::new(pool.clone()),
            audit: AuditLogRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn record_purchase(
        &self,
        principal: &Principal,
        request: RecordPurchaseRequest,
        source_ip: Option<String>,
    ) -> Result<Purchase, MovementError> {
        require_role(principal, PROCUREMENT_ROLES)?;
        let command = request.into_command()?;

        let mut tx = self.pool.begin().await?;

        let asset = self.lock_asset(&mut tx, command.asset_id).await?;
        if !self.bases.exists_tx(&mut tx, command.base_id).await? {
            return Err(MovementRejection::BaseNotFound.into());
        }

        let purchase: Purchase = self
            .purchases
            .insert_tx(&mut tx, &command, principal.user_id)
            .await?
            .into();

        self.assets
            .relocate_tx(&mut tx, asset.id, command.base_id, asset.status.into())
            .await?;

        self.post_to_ledger(&mut tx, asset.equipment_type_id, &purchase_postings(&command))
            .await?;

        tx.commit().await?;

        info!(
            purchase_id = %purchase.id,
            asset_id = %purchase.asset_id,
            base_id = %purchase.base_id,
            quantity = purchase.quantity,
            user_id = %principal.user_id,
            "Purchase recorded"
        );
        record_movement("purchase");
        self.audit_after_commit(
            audit_helpers::purchase_recorded(principal.user_id, &purchase),
            source_ip,
        );

        Ok(purchase)
    }

    pub async fn record_transfer(
        &self,
        principal: &Principal,
        request: RecordTransferRequest,
        source_ip: Option<String>,
    ) -> Result<Transfer, MovementError> {
        require_role(principal, PROCUREMENT_ROLES)?;
        let command = request.into_command()?;

        let mut tx = self.pool.begin().await?;

        let asset = self.lock_asset(&mut tx, command.asset_id).await?;
        check_transfer_source(&asset, command.from_base_id)?;
        if !self.bases.exists_tx(&mut tx, command.to_base_id).await? {
            return Err(MovementRejection::BaseNotFound.into());
        }

        let transfer: Transfer = self
            .transfers
            .insert_completed_tx(&mut tx, &command, principal.user_id)
            .await?
            .into();

        self.assets
            .relocate_tx(
                &mut tx,
                asset.id,
                command.to_base_id,
                AssetStatusDb::Available,
            )
            .await?;

        self.post_to_ledger(&mut tx, asset.equipment_type_id, &transfer_postings(&command))
            .await?;

        tx.commit().await?;

        info!(
            transfer_id = %transfer.id,
            asset_id = %transfer.asset_id,
            from_base_id = %transfer.from_base_id,
            to_base_id = %transfer.to_base_id,
            quantity = transfer.quantity,
            user_id = %principal.user_id,
            "Transfer recorded"
        );
        record_movement("transfer");
        self.audit_after_commit(
            audit_helpers::transfer_recorded(principal.user_id, &transfer),
            source_ip,
        );

        Ok(transfer)
    }

    pub async fn assign_asset(
        &self,
        principal: &Principal,
        request: AssignAssetRequest,
        source_ip: Option<String>,
    ) -> Result<Assignment, MovementError> {
        let command = request.into_command()?;

        let mut tx = self.pool.begin().await?;

        let asset = self.lock_asset(&mut tx, command.asset_id).await?;
        check_assignable(principal, &asset)?;
        if !self
            .users
            .exists_tx(&mut tx, command.assigned_to_user_id)
            .await?
        {
            return Err(MovementRejection::AssignedUserNotFound.into());
        }

        let assignment: Assignment = self
            .assignments
            .insert_active_tx(
                &mut tx,
                asset.id,
                command.assigned_to_user_id,
                principal.user_id,
            )
            .await?
            .into();

        self.assets
            .set_status_tx(&mut tx, asset.id, AssetStatusDb::Assigned)
            .await?;

        self.post_to_ledger(&mut tx, asset.equipment_type_id, &assignment_postings(&asset))
            .await?;

        tx.commit().await?;

        info!(
            assignment_id = %assignment.id,
            asset_id = %assignment.asset_id,
            assigned_to_user_id = %assignment.assigned_to_user_id,
            base_id = %asset.current_base_id,
            user_id = %principal.user_id,
            "Asset assigned"
        );
        record_movement("assignment");
        self.audit_after_commit(
            audit_helpers::assignment_recorded(principal.user_id, &assignment, asset.current_base_id),
            source_ip,
        );

        Ok(assignment)
    }

    pub async fn record_expenditure(
        &self,
        principal: &Principal,
        request: RecordExpenditureRequest,
        source_ip: Option<String>,
    ) -> Result<Expenditure, MovementError> {
        let command = request.into_command()?;

        let mut tx = self.pool.begin().await?;

        let asset = self.lock_asset(&mut tx, command.asset_id).await?;
        check_expendable(principal, &asset)?;

        let expenditure: Expenditure = self
            .expenditures
            .insert_tx(&mut tx, &command, asset.current_base_id, principal.user_id)
            .await?
            .into();

        self.assets
            .set_status_tx(&mut tx, asset.id, AssetStatus::Expended.into())
            .await?;

        self.post_to_ledger(
            &mut tx,
            asset.equipment_type_id,
            &expenditure_postings(&asset, &command),
        )
        .await?;

        tx.commit().await?;

        info!(
            expenditure_id = %expenditure.id,
            asset_id = %expenditure.asset_id,
            base_id = %expenditure.base_id,
            quantity = expenditure.quantity,
            user_id = %principal.user_id,
            "Expenditure recorded"
        );
        record_movement("expenditure");
        self.audit_after_commit(
            audit_helpers::expenditure_recorded(principal.user_id, &expenditure),
            source_ip,
        );

        Ok(expenditure)
    }

    async fn lock_asset(
        &self,
        conn: &mut PgConnection,
        asset_id: Uuid,
    ) -> Result<Asset, MovementError> {
        self.assets
            .lock_for_update(conn, asset_id)
            .await?
            .map(Into::into)
            .ok_or(MovementError::Rejected(MovementRejection::AssetNotFound))
    }

    /// Applies every posting against today's (UTC) balance rows, in base id
    /// order, while holding the shared ledger lock.
    async fn post_to_ledger(
        &self,
        conn: &mut PgConnection,
        equipment_type_id: Uuid,
        postings: &[LedgerPosting],
    ) -> Result<(), MovementError> {
        let balance_date = Utc::now().date_naive();
        self.balances
            .share_ledger_lock_tx(&mut *conn)
            .await
            .map_err(MovementError::BalanceUpdateFailed)?;
        for posting in lock_order(postings) {
            self.balances
                .upsert_tx(
                    &mut *conn,
                    balance_date,
                    posting.base_id,
                    equipment_type_id,
                    &posting.delta(),
                )
                .await
                .map_err(MovementError::BalanceUpdateFailed)?;
            persistence::metrics::record_balance_upsert(posting.field.as_str());
        }
        Ok(())
    }

    fn audit_after_commit(&self, mut event: CreateAuditLogInput, source_ip: Option<String>) {
        event.ip_address = source_ip;
        self.audit.insert_async(event);
    }
}
