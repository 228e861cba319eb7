use odoo_log_analyzer::app;

fn main() {
    app::main();
}
