//! RedisSortedSet: sorted-set backend over a Redis connection
//!
//! One synchronous connection is opened per process and kept behind a
//! `parking_lot::Mutex`, which gives `&self` methods the exclusive access the
//! client needs. The connection is closed when the store is dropped.
//!
//! Command mapping:
//!
//! | Trait method   | Redis command                           |
//! |----------------|-----------------------------------------|
//! | `delete`       | `DEL set`                               |
//! | `add_many`     | `ZADD set score m1 score m2 ...`        |
//! | `range_by_lex` | `ZRANGEBYLEX set [lower [upper`         |
//! | `exists`       | `EXISTS set`                            |
//! | `card`         | `ZCARD set`                             |

use std::fmt;

use parking_lot::Mutex;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::debug;

use lexset_core::{LexsetError, LexsetResult};

use crate::sorted_set::SortedSet;

/// Marks a `ZRANGEBYLEX` bound as inclusive
const INCLUSIVE: u8 = b'[';

/// Connection parameters for a Redis server
#[derive(Clone, PartialEq, Eq)]
pub struct RedisParams {
    /// Server host name or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Password for `AUTH`; `None` skips authentication
    pub password: Option<String>,
    /// Logical database number (`SELECT`)
    pub db: i64,
}

impl Default for RedisParams {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            db: 0,
        }
    }
}

// Hand-written so the password never reaches logs
impl fmt::Debug for RedisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("db", &self.db)
            .finish()
    }
}

impl RedisParams {
    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                username: None,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// Sorted-set backend talking to a Redis server
pub struct RedisSortedSet {
    conn: Mutex<redis::Connection>,
    endpoint: String,
}

impl fmt::Debug for RedisSortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSortedSet")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl RedisSortedSet {
    /// Open a connection
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the server cannot be reached, rejects
    /// the password, or refuses the database number.
    pub fn connect(params: &RedisParams) -> LexsetResult<Self> {
        let endpoint = format!("{}:{}/{}", params.host, params.port, params.db);
        let client = redis::Client::open(params.connection_info())
            .map_err(|e| LexsetError::store_unavailable("CONNECT", e))?;
        let conn = client
            .get_connection()
            .map_err(|e| LexsetError::store_unavailable("CONNECT", format!("{}: {}", endpoint, e)))?;
        debug!(target: "lexset::store", endpoint = %endpoint, "Connected to sorted-set service");
        Ok(Self {
            conn: Mutex::new(conn),
            endpoint,
        })
    }

    /// `host:port/db` this store is connected to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn inclusive_bound(bound: &[u8]) -> Vec<u8> {
    let mut arg = Vec::with_capacity(bound.len() + 1);
    arg.push(INCLUSIVE);
    arg.extend_from_slice(bound);
    arg
}

impl SortedSet for RedisSortedSet {
    fn delete(&self, set: &str) -> LexsetResult<()> {
        let mut conn = self.conn.lock();
        redis::cmd("DEL")
            .arg(set)
            .query::<()>(&mut *conn)
            .map_err(|e| LexsetError::store_unavailable("DEL", e))
    }

    fn add_many(&self, set: &str, score: f64, members: &[&[u8]]) -> LexsetResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(set);
        for member in members {
            cmd.arg(score).arg(*member);
        }

        let mut conn = self.conn.lock();
        cmd.query::<u64>(&mut *conn)
            .map_err(|e| LexsetError::store_unavailable("ZADD", e))
    }

    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>> {
        let mut conn = self.conn.lock();
        redis::cmd("ZRANGEBYLEX")
            .arg(set)
            .arg(inclusive_bound(lower))
            .arg(inclusive_bound(upper))
            .query::<Vec<Vec<u8>>>(&mut *conn)
            .map_err(|e| LexsetError::store_unavailable("ZRANGEBYLEX", e))
    }

    fn exists(&self, set: &str) -> LexsetResult<bool> {
        let mut conn = self.conn.lock();
        redis::cmd("EXISTS")
            .arg(set)
            .query::<bool>(&mut *conn)
            .map_err(|e| LexsetError::store_unavailable("EXISTS", e))
    }

    fn card(&self, set: &str) -> LexsetResult<u64> {
        let mut conn = self.conn.lock();
        redis::cmd("ZCARD")
            .arg(set)
            .query::<u64>(&mut *conn)
            .map_err(|e| LexsetError::store_unavailable("ZCARD", e))
    }
}
