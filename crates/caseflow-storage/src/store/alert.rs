use crate::entities::alert::{self, Column, Entity};
use crate::error::{Result, StorageError};
use crate::store::CaseStore;
use caseflow_common::id;
use caseflow_common::types::Alert;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

fn to_alert(m: alert::Model) -> Result<Alert> {
    let workflow_status = m
        .workflow_status
        .parse()
        .map_err(|_| StorageError::InvalidValue {
            column: "workflow_status",
            value: m.workflow_status.clone(),
        })?;
    let metadata: HashMap<String, String> = serde_json::from_str(&m.metadata_json)?;
    Ok(Alert {
        id: m.alert_id,
        report_id: m.report_id,
        case_number: m.case_number,
        alert_type: m.alert_type,
        description: m.description,
        alert_date: m.alert_date,
        workflow_status,
        resolved_at: m.resolved_at.map(|t| t.with_timezone(&Utc)),
        resolution_notes: m.resolution_notes,
        metadata,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

fn to_active(alert: &Alert, row_id: String) -> Result<alert::ActiveModel> {
    Ok(alert::ActiveModel {
        row_id: Set(row_id),
        alert_id: Set(alert.id.clone()),
        report_id: Set(alert.report_id.clone()),
        case_number: Set(alert.case_number.clone()),
        alert_type: Set(alert.alert_type.clone()),
        description: Set(alert.description.clone()),
        alert_date: Set(alert.alert_date),
        workflow_status: Set(alert.workflow_status.to_string()),
        resolved_at: Set(alert.resolved_at.map(|t| t.fixed_offset())),
        resolution_notes: Set(alert.resolution_notes.clone()),
        metadata_json: Set(serde_json::to_string(&alert.metadata)?),
        created_at: Set(alert.created_at.fixed_offset()),
        updated_at: Set(alert.updated_at.fixed_offset()),
    })
}

impl CaseStore {
    /// The full stored alert collection in insertion order.
    pub async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let rows = Entity::find()
            .order_by(Column::CreatedAt, Order::Asc)
            .order_by(Column::RowId, Order::Asc)
            .all(self.db())
            .await?;
        rows.into_iter().map(to_alert).collect()
    }

    /// Replace the entire stored collection with a new snapshot, in one
    /// transaction so a failed import never half-applies.
    pub async fn replace_alerts(&self, alerts: &[Alert]) -> Result<()> {
        let txn = self.db.begin().await?;
        Entity::delete_many().exec(&txn).await?;
        for alert in alerts {
            to_active(alert, id::next_id())?.insert(&txn).await?;
        }
        txn.commit().await?;
        tracing::debug!(count = alerts.len(), "replaced alert snapshot");
        Ok(())
    }

    /// Every stored copy sharing a logical alert id. Plural because
    /// historical imports could write duplicates.
    pub async fn get_alerts_by_id(&self, alert_id: &str) -> Result<Vec<Alert>> {
        let rows = Entity::find()
            .filter(Column::AlertId.eq(alert_id))
            .order_by(Column::RowId, Order::Asc)
            .all(self.db())
            .await?;
        rows.into_iter().map(to_alert).collect()
    }

    /// Fan-out write: propagate a resolved status update to every stored
    /// copy sharing the logical id. Returns the number of rows touched.
    pub async fn update_alerts_by_id(&self, resolved: &Alert) -> Result<u64> {
        let rows = Entity::find()
            .filter(Column::AlertId.eq(resolved.id.as_str()))
            .all(self.db())
            .await?;
        let mut touched = 0;
        for model in rows {
            let row_id = model.row_id.clone();
            let row_created_at = model.created_at;
            let mut am = to_active(resolved, row_id)?;
            // Duplicate copies keep their own creation stamps.
            am.created_at = Set(row_created_at);
            am.update(self.db()).await?;
            touched += 1;
        }
        Ok(touched)
    }

    pub async fn count_alerts(&self) -> Result<u64> {
        Ok(Entity::find().count(self.db()).await?)
    }
}
