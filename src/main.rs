fn main() {
    learnpath::app::logging::init_tracing();
    learnpath::app::cli::run();
}
