use nlp_transform::{
    cli::{LogFormat, Opts, SubCommand},
    trace, validate,
};

fn main() {
    let opts = Opts::get_matches();

    let color = opts.root.color.use_color();
    let json = opts.root.log_format == LogFormat::Json;
    trace::init(color, json, opts.log_level());

    let code = match &opts.sub_command {
        SubCommand::Validate(validate_opts) => validate::validate(validate_opts),
    };

    std::process::exit(code);
}
