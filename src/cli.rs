use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const MSG_LONG_HELP: &str = "Shown on the text lines below the picture when the disk boots.
Up to 40 characters, lower case is converted to upper case,
and characters the Apple II cannot show become spaces.";
const TRACKS_LONG_HELP: &str = "Total number of tracks including the boot track.
Tracks after the first are painted with the picture; fewer tracks make a
wider ring, more tracks reach further toward the hub.";

fn dimg_arg() -> Arg {
    Arg::new("dimg").short('d').long("dimg").help("path to disk image to create")
        .value_name("PATH")
        .value_hint(ValueHint::FilePath)
        .required(true)
}

pub fn build_cli() -> Command {
    let long_help = "picturedsk is always invoked with exactly one of several subcommands.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
make a picture disk:   `picturedsk mkpic -i cat.png -d cat.woz`
with a message:        `picturedsk mkpic -i cat.bmp -d cat.woz -m \"HERE KITTY\"`
bash completions:      `picturedsk completions -s bash > picturedsk.bash`";

    let mut main_cmd = Command::new("picturedsk")
        .about("Makes Apple II picture disks in WOZ format.")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("mkpic")
            .arg(Arg::new("image").short('i').long("image").help("path to picture, BMP or PNG")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .required(true)
            )
            .arg(dimg_arg())
            .arg(Arg::new("message").short('m').long("message").help("message to show with the picture")
                .value_name("TEXT")
                .long_help(MSG_LONG_HELP)
                .required(false)
            )
            .arg(Arg::new("tracks").long("tracks").help("number of tracks")
                .value_name("COUNT")
                .value_parser(value_parser!(u8).range(1..=53))
                .long_help(TRACKS_LONG_HELP)
                .required(false)
                .default_value("46")
            )
            .arg(Arg::new("creator").long("creator").help("creator recorded in the image, up to 32 characters")
                .value_name("NAME")
                .required(false)
            )
            .arg(Arg::new("unprotected").long("unprotected").help("do not mark the image write protected")
                .action(ArgAction::SetTrue)
            )
            .arg(Arg::new("force").long("force").help("overwrite an existing disk image")
                .action(ArgAction::SetTrue)
            )
            .about("write a picture disk to the given path")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(
                Arg::new("shell").short('s').long("shell").help("shell target").value_name("NAME")
                    .required(true)
                    .value_parser(["bash","elv","fish","ps1","zsh"])
            )
            .about("write completions script to stdout for the specified shell")
    );
    return main_cmd;
}
