fn main() -> Result<(), eframe::Error> {
    textile_frontend::run_frontend()
}
