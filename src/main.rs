use loxcheck::cli;

fn main() {
    cli::run();
}
