//! Diesel schema for queue persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Urgency level.
        priority -> Text,
        /// Lifecycle status.
        status -> Text,
        /// Optional assignee identity.
        assignee -> Nullable<Text>,
        /// Optional date-only deadline.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> TimestamptzSqlite,
        /// Last update timestamp.
        updated_at -> TimestamptzSqlite,
        /// Completion timestamp, set iff status is completed.
        completed_at -> Nullable<TimestamptzSqlite>,
        /// Chat user that created the task, if any.
        origin_user -> Nullable<Text>,
        /// Channel the creating message arrived on, if any.
        origin_channel -> Nullable<Text>,
    }
}

diesel::table! {
    /// Dedup ledger of processed inbound messages.
    processed_messages (id) {
        /// Row identifier.
        id -> BigInt,
        /// Platform message timestamp.
        message_ts -> Text,
        /// Channel the message arrived on.
        channel -> Text,
        /// When the message was claimed for processing.
        processed_at -> TimestamptzSqlite,
    }
}

diesel::table! {
    /// Append-only audit trail of task mutations.
    activity_log (id) {
        /// Row identifier.
        id -> BigInt,
        /// Task the action applies to, if any.
        task_id -> Nullable<BigInt>,
        /// Action label.
        action -> Text,
        /// Acting identity, if known.
        actor -> Nullable<Text>,
        /// When the action happened.
        timestamp -> TimestamptzSqlite,
        /// Optional free-text detail.
        details -> Nullable<Text>,
    }
}
