pub const SCHEMA: &str = "
-- One JSON document per persisted collection
CREATE TABLE IF NOT EXISTS collections (
    name TEXT PRIMARY KEY,        -- Storage key, e.g. promptvault-prompts
    data TEXT NOT NULL,           -- JSON document
    updated_at INTEGER NOT NULL   -- Unix timestamp (milliseconds)
);
";
