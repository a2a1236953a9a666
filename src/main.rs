fn main() {
    wibble::cli::run();
}
