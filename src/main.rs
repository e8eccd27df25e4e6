fn main() {
    xcm2sl::cli::run();
}
