mod health;
mod history;
mod monitor;

macros_utils::routes! {
    module health,
    module monitor,
    module history,
}
