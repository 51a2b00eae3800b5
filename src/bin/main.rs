use music_ontology::cli;

fn main() -> music_ontology::Result<()> {
    cli::main()
}
