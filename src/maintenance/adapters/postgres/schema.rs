//! Diesel schema for routine maintenance persistence.

diesel::table! {
    /// Recurring maintenance tasks registered by organizations.
    routine_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning organization.
        organization_id -> Uuid,
        /// Building or location name.
        #[max_length = 255]
        facility -> Varchar,
        /// Short maintenance title.
        #[max_length = 255]
        event -> Varchar,
        /// Free-text description.
        description -> Nullable<Text>,
        /// Optional room number.
        #[max_length = 50]
        room_number -> Nullable<Varchar>,
        /// First day of the schedule.
        date_begun -> Date,
        /// Recurrence kind name.
        #[max_length = 20]
        recurrence -> Varchar,
        /// Day count for custom schedules, stored as text by older clients.
        #[max_length = 255]
        custom_recurrence -> Nullable<Varchar>,
        /// Whether the sweep considers this task.
        is_active -> Bool,
        /// Registering user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Support tickets, including those generated by the sweep.
    tickets (id) {
        /// Ticket identifier.
        id -> Uuid,
        /// Task that produced the ticket.
        source_task_id -> Uuid,
        /// Owning organization.
        organization_id -> Uuid,
        /// Requesting user.
        requestor_id -> Uuid,
        /// Request category.
        #[max_length = 50]
        request_type -> Varchar,
        /// Ticket title.
        title -> Text,
        /// Ticket description.
        description -> Text,
        /// Urgency.
        #[max_length = 20]
        priority -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Building name.
        #[max_length = 255]
        building -> Varchar,
        /// Optional room number.
        #[max_length = 50]
        room_number -> Nullable<Varchar>,
        /// Day the occurrence was materialized for.
        due_date -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
