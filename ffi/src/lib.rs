use jni::objects::{JClass, JString};
use jni::sys::{jint, jlong, jstring};
use jni::JNIEnv;
use serde_json::json;
use surge_engine::api::{run_surge, SurgeConfig};
use surge_engine::Dice;

fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_healingsurge_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, format!("surge-ffi {}", env!("CARGO_PKG_VERSION")))
}

/// Sum of `n` hit dice of `sides` each, saturated to `jint`.
/// n<=0 → 0, sides<=0 → 0 per die.
#[no_mangle]
pub extern "system" fn Java_com_healingsurge_Ffi_rollHitDice(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    seed: jlong,
    n: jint,
    sides: jint,
) -> jint {
    roll_internal(seed, n, sides)
}

/// Runs a whole surge from a JSON `SurgeConfig` and returns
/// `{"ok":true,"result":<report>}` or `{"ok":false,"error":"..."}`.
#[no_mangle]
pub extern "system" fn Java_com_healingsurge_Ffi_resolveSurgeJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return to_jstring(&env, err_payload(e)),
    };
    to_jstring(&env, surge_json_internal(&input))
}

// Internal functions for testing without JNI overhead
pub fn roll_internal(seed: i64, n: i32, sides: i32) -> i32 {
    let mut dice = Dice::from_seed(seed as u64);
    let sides = sides.max(0) as u32;
    let mut total = 0i64;
    for _ in 0..n.max(0) {
        total += dice.die(sides) as i64;
    }
    total.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

pub fn surge_json_internal(input: &str) -> String {
    let cfg: SurgeConfig = match serde_json::from_str(input) {
        Ok(c) => c,
        Err(e) => return err_payload(format!("invalid_config: {}", e)),
    };
    let report = match run_surge(cfg) {
        Ok(r) => r,
        Err(e) => return err_payload(format!("{:#}", e)),
    };
    match serde_json::to_value(report) {
        Ok(value) => json!({ "ok": true, "result": value }).to_string(),
        Err(e) => err_payload(e),
    }
}

fn err_payload(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}
