use utfview::utfview;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    utfview(std::env::args_os().skip(1))
}
