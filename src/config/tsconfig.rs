//! Conversion of raw `compilerOptions` JSON into typed [`CompilerOptions`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{CompilerOptions, JsxMode, ModuleKind, ModuleResolution, ScriptTarget};

/// Convert the `compilerOptions` object of a tsconfig.
///
/// `None` and `null` produce empty options. Every invalid option is
/// reported; the conversion fails if there is at least one.
pub fn convert_compiler_options(raw: Option<&Value>) -> Result<CompilerOptions, Vec<String>> {
    let object = match raw {
        None | Some(Value::Null) => return Ok(CompilerOptions::default()),
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(vec![format!(
                "compilerOptions must be an object, found {}",
                json_type(other)
            )])
        }
    };

    let mut options = CompilerOptions::default();
    let mut errors = Vec::new();

    for (key, value) in object {
        if let Err(message) = apply_option(&mut options, key, value) {
            errors.push(message);
        }
    }

    if errors.is_empty() {
        Ok(options)
    } else {
        Err(errors)
    }
}

/// Extract the `compilerOptions` member of a parsed tsconfig document.
pub fn compiler_options_of(document: &Map<String, Value>) -> Option<&Value> {
    document.get("compilerOptions")
}

fn apply_option(options: &mut CompilerOptions, key: &str, value: &Value) -> Result<(), String> {
    // Option names are case-insensitive for the compiler as well.
    match key.to_ascii_lowercase().as_str() {
        "allowjs" => options.allow_js = Some(as_bool(key, value)?),
        "checkjs" => options.check_js = Some(as_bool(key, value)?),
        "resolvejsonmodule" => options.resolve_json_module = Some(as_bool(key, value)?),
        "esmoduleinterop" => options.es_module_interop = Some(as_bool(key, value)?),
        "allowsyntheticdefaultimports" => {
            options.allow_synthetic_default_imports = Some(as_bool(key, value)?)
        }
        "strict" => options.strict = Some(as_bool(key, value)?),
        "skiplibcheck" => options.skip_lib_check = Some(as_bool(key, value)?),
        "forceconsistentcasinginfilenames" => {
            options.force_consistent_casing_in_file_names = Some(as_bool(key, value)?)
        }
        "noemit" => options.no_emit = Some(as_bool(key, value)?),
        "declaration" => options.declaration = Some(as_bool(key, value)?),
        "isolatedmodules" => options.isolated_modules = Some(as_bool(key, value)?),
        "verbatimmodulesyntax" => options.verbatim_module_syntax = Some(as_bool(key, value)?),
        "target" => {
            options.target = Some(as_enum(
                key,
                value,
                ScriptTarget::from_str,
                ScriptTarget::allowed_values(),
            )?)
        }
        "module" => {
            options.module = Some(as_enum(
                key,
                value,
                ModuleKind::from_str,
                ModuleKind::allowed_values(),
            )?)
        }
        "moduleresolution" => {
            options.module_resolution = Some(as_enum(
                key,
                value,
                ModuleResolution::from_str,
                ModuleResolution::allowed_values(),
            )?)
        }
        "jsx" => {
            options.jsx = Some(as_enum(key, value, JsxMode::from_str, JsxMode::allowed_values())?)
        }
        "baseurl" => options.base_url = Some(as_string(key, value)?),
        "rootdir" => options.root_dir = Some(as_string(key, value)?),
        "outdir" => options.out_dir = Some(as_string(key, value)?),
        "lib" => options.lib = Some(as_string_list(key, value)?),
        "types" => options.types = Some(as_string_list(key, value)?),
        "paths" => options.paths = Some(as_paths(key, value)?),
        lowered => {
            let kind = known_option_kind(lowered)
                .ok_or_else(|| format!("Unknown compiler option '{}'.", key))?;
            check_kind(key, value, kind)?;
            options.other.insert(key.to_string(), value.clone());
        }
    }

    Ok(())
}

/// JSON shape expected for a known option without a typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    Boolean,
    String,
    Number,
    StringList,
    ObjectList,
}

/// Compiler options that exist but have no typed field, by lowercase name.
fn known_option_kind(lowered: &str) -> Option<OptionKind> {
    let kind = match lowered {
        "allowarbitraryextensions"
        | "allowimportingtsextensions"
        | "allowumdglobalaccess"
        | "allowunreachablecode"
        | "allowunusedlabels"
        | "alwaysstrict"
        | "assumechangesonlyaffectdirectdependencies"
        | "composite"
        | "declarationmap"
        | "diagnostics"
        | "disablereferencedprojectload"
        | "disablesizelimit"
        | "disablesolutionsearching"
        | "disablesourceofprojectreferenceredirect"
        | "downleveliteration"
        | "emitbom"
        | "emitdeclarationonly"
        | "emitdecoratormetadata"
        | "erasablesyntaxonly"
        | "exactoptionalpropertytypes"
        | "experimentaldecorators"
        | "explainfiles"
        | "extendeddiagnostics"
        | "importhelpers"
        | "incremental"
        | "inlinesourcemap"
        | "inlinesources"
        | "isolateddeclarations"
        | "keyofstringsonly"
        | "libreplacement"
        | "listemittedfiles"
        | "listfiles"
        | "noemithelpers"
        | "noemitonerror"
        | "noerrortruncation"
        | "nofallthroughcasesinswitch"
        | "noimplicitany"
        | "noimplicitoverride"
        | "noimplicitreturns"
        | "noimplicitthis"
        | "noimplicitusestrict"
        | "nolib"
        | "nopropertyaccessfromindexsignature"
        | "noresolve"
        | "nostrictgenericchecks"
        | "nouncheckedindexedaccess"
        | "nouncheckedsideeffectimports"
        | "nounusedlocals"
        | "nounusedparameters"
        | "preserveconstenums"
        | "preservesymlinks"
        | "preservevalueimports"
        | "preservewatchoutput"
        | "pretty"
        | "removecomments"
        | "resolvepackagejsonexports"
        | "resolvepackagejsonimports"
        | "rewriterelativeimportextensions"
        | "skipdefaultlibcheck"
        | "sourcemap"
        | "strictbindcallapply"
        | "strictbuiltiniteratorreturn"
        | "strictfunctiontypes"
        | "strictnullchecks"
        | "strictpropertyinitialization"
        | "stripinternal"
        | "suppressexcesspropertyerrors"
        | "suppressimplicitanyindexerrors"
        | "traceresolution"
        | "usedefineforclassfields"
        | "useunknownincatchvariables" => OptionKind::Boolean,
        "charset"
        | "declarationdir"
        | "generatecpuprofile"
        | "generatetrace"
        | "ignoredeprecations"
        | "importsnotusedasvalues"
        | "jsxfactory"
        | "jsxfragmentfactory"
        | "jsximportsource"
        | "maproot"
        | "moduledetection"
        | "newline"
        | "out"
        | "outfile"
        | "reactnamespace"
        | "sourceroot"
        | "tsbuildinfofile" => OptionKind::String,
        "maxnodemodulejsdepth" => OptionKind::Number,
        "customconditions" | "modulesuffixes" | "rootdirs" | "typeroots" => OptionKind::StringList,
        "plugins" => OptionKind::ObjectList,
        _ => return None,
    };
    Some(kind)
}

fn check_kind(key: &str, value: &Value, kind: OptionKind) -> Result<(), String> {
    match kind {
        OptionKind::Boolean => as_bool(key, value).map(|_| ()),
        OptionKind::String => as_string(key, value).map(|_| ()),
        OptionKind::Number => value
            .as_f64()
            .map(|_| ())
            .ok_or_else(|| type_error(key, "number", value)),
        OptionKind::StringList => as_string_list(key, value).map(|_| ()),
        OptionKind::ObjectList => {
            let items = value
                .as_array()
                .ok_or_else(|| type_error(key, "list", value))?;
            if items.iter().all(Value::is_object) {
                Ok(())
            } else {
                Err(type_error(key, "list of objects", value))
            }
        }
    }
}

fn as_bool(key: &str, value: &Value) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| type_error(key, "boolean", value))
}

fn as_string(key: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| type_error(key, "string", value))
}

fn as_string_list(key: &str, value: &Value) -> Result<Vec<String>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| type_error(key, "list", value))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| type_error(key, "list of strings", value))
        })
        .collect()
}

fn as_enum<T>(
    key: &str,
    value: &Value,
    lookup: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<T, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| type_error(key, "string", value))?;

    lookup(raw).ok_or_else(|| {
        format!(
            "Argument for '{}' option must be: {}",
            key,
            allowed
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn as_paths(key: &str, value: &Value) -> Result<BTreeMap<String, Vec<String>>, String> {
    let object = value
        .as_object()
        .ok_or_else(|| type_error(key, "object", value))?;

    let mut paths = BTreeMap::new();
    for (pattern, targets) in object {
        let targets = as_string_list(&format!("{}.{}", key, pattern), targets)?;
        paths.insert(pattern.clone(), targets);
    }
    Ok(paths)
}

fn type_error(key: &str, expected: &str, value: &Value) -> String {
    format!(
        "Compiler option '{}' requires a value of type {}, found {}",
        key,
        expected,
        json_type(value)
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
