//! `SeaORM` Entity for reconciliation_records table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reconciliation_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub collective: String,
    pub bank: Option<String>,
    pub account: Option<String>,
    pub withdrawals_bank_not_accounting: Option<f64>,
    pub deposits_accounting_not_bank: Option<f64>,
    pub deposits_bank_not_accounting: Option<f64>,
    pub accounting_balance: Option<f64>,
    pub reconciled_balance: Option<f64>,
    pub account_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
