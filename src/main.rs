use branchviz::ui::output;

fn main() {
    if let Err(err) = branchviz::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
