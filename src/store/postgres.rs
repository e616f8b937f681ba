use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::env;
use uuid::Uuid;

use crate::models::bids::{self, BidStatus};
use crate::models::gigs::{self, GigStatus};
use crate::store::{MarketStore, StoreError};

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Postgres-backed [`MarketStore`].
///
/// The assignment primitive runs inside a transaction whose first statement
/// is a conditional `UPDATE gigs SET status = 'assigned' WHERE id = $1 AND
/// status = 'open'`. The row lock taken by that update serializes concurrent
/// hires on the same gig; a loser re-evaluates the predicate after the
/// winner commits, matches zero rows, and rolls back.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Deadlocks (40P01) and serialization failures (40001) are worth retrying;
/// everything else is fatal.
fn classify(err: DbErr) -> StoreError {
    match sqlstate(&err).as_deref() {
        Some("40001") | Some("40P01") => StoreError::Transient(err.to_string()),
        _ => StoreError::Db(err),
    }
}

/// SQLSTATE of the driver error underneath a [`DbErr`], if any. sea-orm's
/// `sql_err()` only classifies constraint violations, so the code is read
/// off the sqlx error directly.
fn sqlstate(err: &DbErr) -> Option<String> {
    use sea_orm::sqlx::error::DatabaseError;

    let (DbErr::Conn(RuntimeErr::SqlxError(e))
    | DbErr::Exec(RuntimeErr::SqlxError(e))
    | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return None;
    };
    match &**e {
        sea_orm::sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
        _ => None,
    }
}

#[async_trait]
impl MarketStore for SeaOrmStore {
    async fn insert_gig(&self, gig: gigs::Model) -> Result<gigs::Model, StoreError> {
        let active = gigs::ActiveModel {
            id: Set(gig.id),
            title: Set(gig.title),
            description: Set(gig.description),
            budget: Set(gig.budget),
            owner_id: Set(gig.owner_id),
            status: Set(gig.status),
            created_at: Set(gig.created_at),
        };
        Ok(active.insert(&self.db).await?)
    }

    async fn gig_by_id(&self, id: Uuid) -> Result<Option<gigs::Model>, StoreError> {
        Ok(gigs::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_open_gigs(
        &self,
        title_filter: Option<&str>,
    ) -> Result<Vec<gigs::Model>, StoreError> {
        // Scoped import: PgExpr carries other methods (e.g. `contains`) that
        // would shadow inherent ones if brought in at module level.
        use sea_orm::sea_query::extension::postgres::PgExpr;

        let mut query = gigs::Entity::find()
            .filter(gigs::Column::Status.eq(GigStatus::Open))
            .order_by_desc(gigs::Column::CreatedAt);
        if let Some(term) = title_filter {
            query = query.filter(Expr::col(gigs::Column::Title).ilike(format!("%{term}%")));
        }
        Ok(query.all(&self.db).await?)
    }

    async fn insert_bid(&self, bid: bids::Model) -> Result<bids::Model, StoreError> {
        let active = bids::ActiveModel {
            id: Set(bid.id),
            gig_id: Set(bid.gig_id),
            freelancer_id: Set(bid.freelancer_id),
            message: Set(bid.message),
            amount: Set(bid.amount),
            status: Set(bid.status),
            created_at: Set(bid.created_at),
        };
        Ok(active.insert(&self.db).await?)
    }

    async fn bid_by_id(&self, id: Uuid) -> Result<Option<bids::Model>, StoreError> {
        Ok(bids::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn bids_for_gig(&self, gig_id: Uuid) -> Result<Vec<bids::Model>, StoreError> {
        Ok(bids::Entity::find()
            .filter(bids::Column::GigId.eq(gig_id))
            .order_by_asc(bids::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn assign_gig_to_bid(
        &self,
        gig_id: Uuid,
        bid_id: Uuid,
    ) -> Result<(gigs::Model, bids::Model), StoreError> {
        let txn = self.db.begin().await.map_err(classify)?;

        // The race guard: claim the gig only if it is still open. Zero rows
        // affected means a concurrent hire got there first.
        let claimed = gigs::Entity::update_many()
            .col_expr(gigs::Column::Status, Expr::value(GigStatus::Assigned))
            .filter(gigs::Column::Id.eq(gig_id))
            .filter(gigs::Column::Status.eq(GigStatus::Open))
            .exec(&txn)
            .await
            .map_err(classify)?;
        if claimed.rows_affected == 0 {
            txn.rollback().await.map_err(classify)?;
            return Err(StoreError::AlreadyAssigned);
        }

        bids::Entity::update_many()
            .col_expr(bids::Column::Status, Expr::value(BidStatus::Hired))
            .filter(bids::Column::Id.eq(bid_id))
            .exec(&txn)
            .await
            .map_err(classify)?;

        bids::Entity::update_many()
            .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
            .filter(bids::Column::GigId.eq(gig_id))
            .filter(bids::Column::Id.ne(bid_id))
            .filter(bids::Column::Status.eq(BidStatus::Pending))
            .exec(&txn)
            .await
            .map_err(classify)?;

        let gig = gigs::Entity::find_by_id(gig_id)
            .one(&txn)
            .await
            .map_err(classify)?
            .ok_or(StoreError::RecordVanished("gig"))?;
        let bid = bids::Entity::find_by_id(bid_id)
            .one(&txn)
            .await
            .map_err(classify)?
            .ok_or(StoreError::RecordVanished("bid"))?;

        txn.commit().await.map_err(classify)?;
        Ok((gig, bid))
    }
}
