//! Esquema Diesel (escrito a mano, equivalente a `diesel print-schema`).

diesel::table! {
    form_sessions (id) {
        id -> Uuid,
        hash -> Nullable<Text>,
        current_step -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    step_records (id) {
        id -> BigInt,
        session_id -> Uuid,
        step_type -> Text,
        data -> Text,
        modified_at -> Timestamptz,
    }
}

diesel::joinable!(step_records -> form_sessions (session_id));

diesel::allow_tables_to_appear_in_same_query!(form_sessions, step_records);
