use crate::store::GameRecord;
use sled::IVec;
use std::time::Duration;
use tokio_postgres::{types::ToSql, Client, NoTls, Statement};

/// Drains finished-game records from the archive tree into PostgreSQL.
pub async fn sync_game_stats(archive: sled::Tree) {
    let client = match connect_pg().await {
        Ok(client) => client,
        Err(err) => return log::warn!("Not archiving to PostgreSQL: {:?}", err),
    };

    let sql = "INSERT INTO game (id, code, started, finished, players, outcome, winner)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT DO NOTHING;";
    let Ok(insert) = client.prepare(sql).await else {
        return log::error!("Could not create prepared statement");
    };

    log::info!("Writing game statistics to PostgreSQL.");
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;

        if client.is_closed() {
            log::error!("Connection to PostgreSQL closed.");
            return;
        }

        let Some((key, record)) = archive.iter().flat_map(|e| e.ok().and_then(read_row)).next() else {
            continue;
        };

        if let Err(err) = write_row(&client, &insert, key, &record).await {
            log::error!("Could not write row: {:?}", err);
            continue;
        }

        log::info!("Archived game {} to PostgreSQL", record.id);
        archive.remove(key.to_be_bytes()).ok();
    }
}

async fn connect_pg() -> anyhow::Result<Client> {
    let host = std::env::var("PG_HOST")?;
    let user = std::env::var("PG_USER")?;
    let password = std::env::var("PG_PASSWORD")?;
    let dbname = std::env::var("PG_DBNAME")?;

    let (client, connection) = tokio_postgres::Config::new()
        .host(&host)
        .user(&user)
        .password(&password)
        .dbname(&dbname)
        .connect(NoTls)
        .await?;

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            log::error!("PostgreSQL connection error: {}", err);
        }
    });

    Ok(client)
}

fn read_row(entry: (IVec, IVec)) -> Option<(u64, GameRecord)> {
    let key = u64::from_be_bytes(entry.0.as_ref().try_into().ok()?);
    let record = serde_json::from_slice::<GameRecord>(&entry.1).ok()?;
    Some((key, record))
}

async fn write_row(client: &Client, stmt: &Statement, key: u64, record: &GameRecord) -> anyhow::Result<()> {
    let key = key as i64;
    let outcome = record.outcome.to_string();
    let args: [&(dyn ToSql + Sync); 7] = [
        &key,
        &record.id.as_str(),
        &record.started,
        &record.finished,
        &record.players,
        &outcome,
        &record.winner,
    ];
    client.execute(stmt, &args).await?;
    Ok(())
}
