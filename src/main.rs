use roomstyler::RoomStylerApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = RoomStylerApp::new()?;
    app.run()
}
