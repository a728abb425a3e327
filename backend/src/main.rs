fn main() -> anyhow::Result<()> {
  vibetracks_lib::run()
}
