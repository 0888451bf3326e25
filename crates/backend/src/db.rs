use anyhow::Context;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager, ManagerConfig},
    AsyncPgConnection, RunQueryDsl,
};
use shared_types::{DateSelection, Room};

use crate::models::NewDateSelection;

pub type DbPool = Pool<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    // Parse the connection string and connect with TLS
    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    // Build the async connection from the tokio-postgres client
    AsyncPgConnection::try_from(client).await
}

pub fn establish_connection_pool() -> anyhow::Result<DbPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup =
        Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
        database_url,
        manager_config,
    );
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

// Room database operations
pub mod rooms {
    use super::*;

    pub async fn list_all(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<Room>> {
        use crate::schema::rooms::dsl::*;

        let items = rooms.order_by(created_at.desc()).load::<Room>(conn).await?;

        Ok(items)
    }

    pub async fn get_by_id(
        conn: &mut AsyncPgConnection,
        room_id_val: &str,
    ) -> anyhow::Result<Option<Room>> {
        use crate::schema::rooms::dsl::*;

        let room = rooms
            .filter(id.eq(room_id_val))
            .first::<Room>(conn)
            .await
            .optional()?;

        Ok(room)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        room_id_val: &str,
        name_val: &str,
    ) -> anyhow::Result<Room> {
        use crate::schema::rooms::dsl::*;

        let new_room = diesel::insert_into(rooms)
            .values((id.eq(room_id_val), name.eq(name_val)))
            .get_result::<Room>(conn)
            .await?;

        Ok(new_room)
    }

    /// Delete a room. Returns false when no such room existed.
    pub async fn delete(conn: &mut AsyncPgConnection, room_id_val: &str) -> anyhow::Result<bool> {
        use crate::schema::rooms::dsl::*;

        let deleted = diesel::delete(rooms.filter(id.eq(room_id_val)))
            .execute(conn)
            .await?;

        Ok(deleted > 0)
    }
}

// Date selection database operations
pub mod selections {
    use super::*;

    pub async fn list_for_room(
        conn: &mut AsyncPgConnection,
        room_id_val: &str,
    ) -> anyhow::Result<Vec<DateSelection>> {
        use crate::schema::date_selections::dsl::*;

        let items = date_selections
            .filter(room_id.eq(room_id_val))
            .order_by(selected_date.asc())
            .load::<DateSelection>(conn)
            .await?;

        Ok(items)
    }

    /// Insert a selection. Returns None when the (room, name, date) tuple
    /// already exists.
    pub async fn insert(
        conn: &mut AsyncPgConnection,
        new_selection: NewDateSelection,
    ) -> anyhow::Result<Option<DateSelection>> {
        use crate::schema::date_selections::dsl::*;

        let inserted = diesel::insert_into(date_selections)
            .values(&new_selection)
            .on_conflict_do_nothing()
            .get_result::<DateSelection>(conn)
            .await
            .optional()?;

        Ok(inserted)
    }

    /// Remove a selection. Returns false when no matching row existed.
    pub async fn remove(
        conn: &mut AsyncPgConnection,
        room_id_val: &str,
        name_val: &str,
        date_val: NaiveDate,
    ) -> anyhow::Result<bool> {
        use crate::schema::date_selections::dsl::*;

        let deleted = diesel::delete(
            date_selections
                .filter(room_id.eq(room_id_val))
                .filter(name.eq(name_val))
                .filter(selected_date.eq(date_val)),
        )
        .execute(conn)
        .await?;

        Ok(deleted > 0)
    }

    pub async fn delete_for_room(
        conn: &mut AsyncPgConnection,
        room_id_val: &str,
    ) -> anyhow::Result<usize> {
        use crate::schema::date_selections::dsl::*;

        let deleted = diesel::delete(date_selections.filter(room_id.eq(room_id_val)))
            .execute(conn)
            .await?;

        Ok(deleted)
    }
}
