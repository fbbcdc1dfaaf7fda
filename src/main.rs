use ct_spectrum::app::run;

fn main() -> color_eyre::Result<()> {
    run()
}
