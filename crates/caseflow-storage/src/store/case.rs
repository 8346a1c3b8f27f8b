use crate::entities::case::{self, Column, Entity};
use crate::error::Result;
use crate::store::CaseStore;
use caseflow_common::id;
use caseflow_common::types::CaseSummary;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

/// Case data row (from the `cases` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRow {
    pub id: String,
    pub name: String,
    pub case_number: String,
    pub status: String,
    pub priority: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRow {
    /// The minimal matching surface the reconciliation engine reads.
    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            id: self.id.clone(),
            display_name: self.name.clone(),
            case_number: self.case_number.clone(),
            status: self.status.clone(),
        }
    }
}

/// Fields for a new case record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    pub name: String,
    pub case_number: String,
    pub status: String,
    pub priority: bool,
}

/// Case update request; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub name: Option<String>,
    pub case_number: Option<String>,
    pub status: Option<String>,
    pub priority: Option<bool>,
}

/// Case list filter.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub status_eq: Option<String>,
    pub name_contains: Option<String>,
}

fn to_row(m: case::Model) -> CaseRow {
    CaseRow {
        id: m.id,
        name: m.name,
        case_number: m.case_number,
        status: m.status,
        priority: m.priority,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn apply_filter(mut q: sea_orm::Select<Entity>, filter: &CaseFilter) -> sea_orm::Select<Entity> {
    if let Some(status) = &filter.status_eq {
        q = q.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(name) = &filter.name_contains {
        q = q.filter(Column::Name.contains(name.as_str()));
    }
    q
}

impl CaseStore {
    pub async fn insert_case(&self, new: &NewCase) -> Result<CaseRow> {
        let now = Utc::now().fixed_offset();
        let am = case::ActiveModel {
            id: Set(id::next_id()),
            name: Set(new.name.clone()),
            case_number: Set(new.case_number.clone()),
            status: Set(new.status.clone()),
            priority: Set(new.priority),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    pub async fn get_case_by_id(&self, id: &str) -> Result<Option<CaseRow>> {
        let model = Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(to_row))
    }

    pub async fn list_cases(
        &self,
        filter: &CaseFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CaseRow>> {
        let rows = apply_filter(Entity::find(), filter)
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }

    pub async fn count_cases(&self, filter: &CaseFilter) -> Result<u64> {
        Ok(apply_filter(Entity::find(), filter).count(self.db()).await?)
    }

    /// Full registry snapshot in engine shape, for match passes.
    pub async fn list_case_summaries(&self) -> Result<Vec<CaseSummary>> {
        let rows = Entity::find()
            .order_by(Column::CreatedAt, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(|m| to_row(m).summary()).collect())
    }

    pub async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<Option<CaseRow>> {
        let model = Entity::find_by_id(id).one(self.db()).await?;
        let Some(model) = model else {
            return Ok(None);
        };
        let mut am: case::ActiveModel = model.into();
        if let Some(name) = &update.name {
            am.name = Set(name.clone());
        }
        if let Some(case_number) = &update.case_number {
            am.case_number = Set(case_number.clone());
        }
        if let Some(status) = &update.status {
            am.status = Set(status.clone());
        }
        if let Some(priority) = update.priority {
            am.priority = Set(priority);
        }
        am.updated_at = Set(Utc::now().fixed_offset());
        let updated = am.update(self.db()).await?;
        Ok(Some(to_row(updated)))
    }

    pub async fn delete_case(&self, id: &str) -> Result<bool> {
        let res = Entity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }
}
