fn main() {
    uastify::cli::run();
}
