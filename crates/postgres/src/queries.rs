//! SQL text
//!
//! The snapshot query returns raw `pg_locks` rows; blocker election and
//! graph construction happen in the core, not in SQL. The detail and
//! terminate statements take the backend pid as `$1`.

/// Raw lock rows for one snapshot.
pub const LOCK_ROWS_QUERY: &str = "\
select l.pid                 as pid, \
       l.mode                as mode, \
       l.granted             as granted, \
       l.transactionid::text as tid, \
       l.relation::int8      as relation, \
       l.page::int8          as page, \
       l.tuple::int8         as tuple \
  from pg_catalog.pg_locks l";

/// Display metadata for every backend.
pub const ACTIVITY_QUERY: &str = "\
select a.pid                    as pid, \
       coalesce(a.usename, '') as usename, \
       coalesce(a.query, '')   as query \
  from pg_catalog.pg_stat_activity a";

/// Detailed lock rows for one backend.
pub const LOCK_ITEM_QUERY: &str = "\
select coalesce(db.datname, '')                    as datname, \
       coalesce(l.locktype, '')                    as locktype, \
       coalesce(l.relation::regclass::varchar, '') as relation, \
       coalesce(l.mode, '')                        as mode, \
       coalesce(l.transactionid::varchar, '')      as tid, \
       l.page::int8  as page, \
       l.tuple::int8 as tuple, \
       l.pid         as pid, \
       l.granted     as granted \
  from pg_catalog.pg_locks l \
  left join pg_catalog.pg_database db on db.oid = l.database \
 where l.pid = $1";

/// Ask the server to terminate one backend.
pub const TERMINATE_QUERY: &str = "select pg_catalog.pg_terminate_backend($1)";
