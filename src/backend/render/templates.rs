//! Go text of the generated mock.
//!
//! Each `emit_*` function prints one declaration group from [`MockData`]. Output is gofmt-clean: tab indentation,
//! aligned struct fields, sorted import groups.

use super::data::{MethodData, MockData};
use crate::backend::writer::GoWriter;

/// Print the whole file.
pub fn emit_file(w: &mut GoWriter, mock: &MockData) {
    w.writeln(&mock.header);
    w.newline();
    w.writeln(&format!("package {}", mock.package));
    w.newline();
    emit_imports(w, mock);
    emit_mock_struct(w, mock);
    emit_constructor(w, mock);
    emit_match_call(w, mock);
    emit_take_pending(w, mock);
    emit_call(w, mock);
    emit_expect_call(w, mock);
    emit_call_union(w, mock);
    for method in &mock.methods {
        emit_mock_method(w, mock, method);
    }
    emit_expect_struct(w, mock);
    for method in &mock.methods {
        emit_expect_method(w, mock, method);
    }
    for method in &mock.methods {
        emit_call_record(w, mock, method);
        emit_response_record(w, mock, method);
    }
}

fn emit_imports(w: &mut GoWriter, mock: &MockData) {
    let mut runtime = mock.runtime_imports.clone();
    runtime.sort_by(|a, b| import_path(a).cmp(import_path(b)));
    let mut types = mock.type_imports.clone();
    types.sort_by(|a, b| import_path(a).cmp(import_path(b)));

    w.writeln("import (");
    w.indent();
    for spec in &runtime {
        w.writeln(spec);
    }
    if !types.is_empty() {
        w.newline();
        for spec in &types {
            w.writeln(spec);
        }
    }
    w.dedent();
    w.writeln(")");
    w.newline();
}

/// The quoted path of an import spec line, which is what gofmt sorts by.
fn import_path(spec: &str) -> &str {
    spec.rsplit(' ').next().unwrap_or(spec)
}

fn emit_mock_struct(w: &mut GoWriter, mock: &MockData) {
    let what = if mock.is_function { "function" } else { "interface" };
    w.comment(&format!(
        "{} is a synchronized mock of the {} {}.\n\n\
         Every call made through the mock is handed to the test, which inspects it and injects the outcome.",
        mock.mock_name, what, mock.symbol
    ));
    w.block(&format!("type {}{} struct", mock.mock_name, mock.type_params_decl), |w| {
        w.comment("Timeout bounds how long MatchCall waits for a call; zero waits forever.");
        w.writeln("Timeout time.Duration");
        w.newline();
        w.aligned(&[
            ("t".to_string(), "testing.TB".to_string()),
            ("calls".to_string(), format!("chan {}", mock.call_union())),
            ("mu".to_string(), "sync.Mutex".to_string()),
            ("pending".to_string(), format!("[]{}", mock.call_union())),
            ("current".to_string(), mock.call_union()),
        ]);
    });
    w.newline();
}

fn emit_constructor(w: &mut GoWriter, mock: &MockData) {
    w.comment(&format!("New{} creates a mock that reports failures to t.", mock.mock_name));
    w.block(
        &format!(
            "func New{}{}(t testing.TB) *{}",
            mock.mock_name,
            mock.type_params_decl,
            mock.mock_type()
        ),
        |w| {
            w.writeln(&format!(
                "return &{}{{t: t, calls: make(chan {}, {})}}",
                mock.mock_type(),
                mock.call_union(),
                mock.dispatch_capacity
            ));
        },
    );
    w.newline();
}

fn emit_match_call(w: &mut GoWriter, mock: &MockData) {
    let union = mock.call_union();
    w.comment(
        "MatchCall returns the first call for which pred reports true, looking at queued calls before waiting for\n\
         new ones. Calls that do not match are queued in arrival order for later matches.\n\
         \n\
         When Timeout is non-zero and no matching call arrives in time, the test fails.",
    );
    w.block(
        &format!(
            "func (_imp *{}) MatchCall(pred func({union}) bool) {union}",
            mock.mock_type()
        ),
        |w| {
            w.writeln("_imp.t.Helper()");
            w.block("if _call := _imp.takePending(pred); _call != nil", |w| {
                w.writeln("_imp.current = _call");
                w.writeln("return _call");
            });
            w.writeln("var _timeout <-chan time.Time");
            w.block("if _imp.Timeout > 0", |w| {
                w.writeln("_timer := time.NewTimer(_imp.Timeout)");
                w.writeln("defer _timer.Stop()");
                w.writeln("_timeout = _timer.C");
            });
            w.block("for", |w| {
                w.writeln("select {");
                w.writeln("case _call := <-_imp.calls:");
                w.indent();
                w.block("if pred(_call)", |w| {
                    w.writeln("_imp.current = _call");
                    w.writeln("return _call");
                });
                w.writeln("_imp.mu.Lock()");
                w.writeln("_imp.pending = append(_imp.pending, _call)");
                w.writeln("_imp.mu.Unlock()");
                w.dedent();
                w.writeln("case <-_timeout:");
                w.indent();
                w.writeln(&format!(
                    "_imp.t.Fatalf(\"syncmock: {}: no matching call within %v\", _imp.Timeout)",
                    mock.mock_name
                ));
                w.writeln("return nil");
                w.dedent();
                w.writeln("}");
            });
        },
    );
    w.newline();
}

fn emit_take_pending(w: &mut GoWriter, mock: &MockData) {
    let union = mock.call_union();
    w.block(
        &format!(
            "func (_imp *{}) takePending(pred func({union}) bool) {union}",
            mock.mock_type()
        ),
        |w| {
            w.writeln("_imp.mu.Lock()");
            w.writeln("defer _imp.mu.Unlock()");
            w.block("for _i, _call := range _imp.pending", |w| {
                w.block("if pred(_call)", |w| {
                    w.writeln("_imp.pending = append(_imp.pending[:_i], _imp.pending[_i+1:]...)");
                    w.writeln("return _call");
                });
            });
            w.writeln("return nil");
        },
    );
    w.newline();
}

fn emit_call(w: &mut GoWriter, mock: &MockData) {
    let union = mock.call_union();
    w.comment("Call returns the current call while it is not done, otherwise the next call to arrive.");
    w.block(&format!("func (_imp *{}) Call() {union}", mock.mock_type()), |w| {
        w.writeln("_imp.t.Helper()");
        w.block("if _imp.current != nil && !_imp.current.Done()", |w| {
            w.writeln("return _imp.current");
        });
        w.writeln(&format!("return _imp.MatchCall(func({union}) bool {{ return true }})"));
    });
    w.newline();
}

fn emit_expect_call(w: &mut GoWriter, mock: &MockData) {
    w.comment("ExpectCall waits for calls with specific arguments.");
    w.block(
        &format!("func (_imp *{}) ExpectCall() *{}", mock.mock_type(), mock.expect_type()),
        |w| {
            w.writeln(&format!("return &{}{{imp: _imp}}", mock.expect_type()));
        },
    );
    w.newline();
}

fn emit_call_union(w: &mut GoWriter, mock: &MockData) {
    w.comment(&format!("{}_Call is any call received by {}.", mock.mock_name, mock.mock_name));
    w.block(
        &format!("type {}_Call{} interface", mock.mock_name, mock.type_params_decl),
        |w| {
            w.writeln("Name() string");
            w.writeln("Done() bool");
            for method in &mock.methods {
                w.writeln(&format!("As{}() *{}{}", method.name, method.call_type, mock.type_args));
            }
        },
    );
    w.newline();
}

fn emit_mock_method(w: &mut GoWriter, mock: &MockData, method: &MethodData) {
    let call_type = format!("{}{}", method.call_type, mock.type_args);
    let response_type = format!("{}{}", method.response_type, mock.type_args);

    w.comment(&format!(
        "{} hands the call to the test and blocks until the test injects its outcome.",
        method.name
    ));
    w.block(
        &format!(
            "func (_imp *{}) {}({}){}",
            mock.mock_type(),
            method.name,
            method.param_decls(),
            method.result_types()
        ),
        |w| {
            let mut inits: Vec<String> = method
                .params
                .iter()
                .map(|p| format!("{}: {}", p.field, p.local))
                .collect();
            inits.push(format!("responseCh: make(chan *{response_type}, 1)"));
            w.writeln(&format!("_call := &{call_type}{{{}}}", inits.join(", ")));
            w.writeln("_imp.calls <- _call");
            w.writeln("_resp := <-_call.responseCh");
            w.block("if _resp.kind == \"panic\"", |w| {
                w.writeln("panic(_resp.panicValue)");
            });
            if !method.results.is_empty() {
                let values: Vec<String> = method.results.iter().map(|r| format!("_resp.{}", r.field)).collect();
                w.writeln(&format!("return {}", values.join(", ")));
            }
        },
    );
    w.newline();
}

fn emit_expect_struct(w: &mut GoWriter, mock: &MockData) {
    w.comment(&format!(
        "{}_Expect matches calls by method and deeply equal arguments.",
        mock.mock_name
    ));
    w.block(
        &format!("type {}_Expect{} struct", mock.mock_name, mock.type_params_decl),
        |w| {
            w.writeln(&format!("imp *{}", mock.mock_type()));
        },
    );
    w.newline();
}

fn emit_expect_method(w: &mut GoWriter, mock: &MockData, method: &MethodData) {
    let call_type = format!("{}{}", method.call_type, mock.type_args);
    let union = mock.call_union();

    w.comment(&format!(
        "{} waits for a call to {} whose arguments are deeply equal to the given ones.",
        method.name, method.name
    ));
    w.block(
        &format!(
            "func (_e *{}) {}({}) *{call_type}",
            mock.expect_type(),
            method.name,
            method.param_decls()
        ),
        |w| {
            w.writeln("_e.imp.t.Helper()");
            let header = format!("_call := _e.imp.MatchCall(func(_m {union}) bool");
            w.block_closed_by(&header, "})", |w| {
                if method.params.is_empty() {
                    w.writeln(&format!("return _m.As{}() != nil", method.name));
                } else {
                    w.writeln(&format!("_c := _m.As{}()", method.name));
                    let mut checks = vec!["_c != nil".to_string()];
                    checks.extend(
                        method
                            .params
                            .iter()
                            .map(|p| format!("reflect.DeepEqual(_c.{}, {})", p.field, p.local)),
                    );
                    w.writeln(&format!("return {}", checks.join(" && ")));
                }
            });
            w.block("if _call == nil", |w| w.writeln("return nil"));
            w.writeln(&format!("return _call.As{}()", method.name));
        },
    );
    w.newline();
}

fn emit_call_record(w: &mut GoWriter, mock: &MockData, method: &MethodData) {
    let call_type = format!("{}{}", method.call_type, mock.type_args);
    let response_type = format!("{}{}", method.response_type, mock.type_args);
    let receiver = format!("func (_c *{call_type})");

    w.comment(&format!(
        "{} is a call to {}. Complete it with exactly one Inject method or Forward.",
        method.call_type, method.name
    ));
    w.block(
        &format!("type {}{} struct", method.call_type, mock.type_params_decl),
        |w| {
            if !method.params.is_empty() {
                let rows: Vec<(String, String)> =
                    method.params.iter().map(|p| (p.field.clone(), p.ty.clone())).collect();
                w.aligned(&rows);
                w.newline();
            }
            w.aligned(&[
                ("done".to_string(), "bool".to_string()),
                ("responseCh".to_string(), format!("chan *{response_type}")),
            ]);
        },
    );
    w.newline();

    w.block(&format!("{receiver} Name() string"), |w| {
        w.writeln(&format!("return \"{}\"", method.name));
    });
    w.newline();
    w.comment("Done reports whether the call has been completed.");
    w.block(&format!("{receiver} Done() bool"), |w| w.writeln("return _c.done"));
    w.newline();
    for other in &mock.methods {
        let target = format!("{}{}", other.call_type, mock.type_args);
        w.block(&format!("{receiver} As{}() *{target}", other.name), |w| {
            if other.name == method.name {
                w.writeln("return _c");
            } else {
                w.writeln("return nil");
            }
        });
        w.newline();
    }

    w.block(&format!("{receiver} respond(resp *{response_type})"), |w| {
        w.block("if _c.done", |w| {
            w.writeln(&format!("panic(\"syncmock: {} call already completed\")", method.name));
        });
        w.writeln("_c.done = true");
        w.writeln("_c.responseCh <- resp");
    });
    w.newline();

    emit_injectors(w, method, &receiver, &response_type);
    emit_forward(w, mock, method, &receiver);
}

fn emit_injectors(w: &mut GoWriter, method: &MethodData, receiver: &str, response_type: &str) {
    let result_params: Vec<String> = method
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("r{i} {}", r.ty))
        .collect();
    let result_inits: Vec<String> = method
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| format!(", {}: r{i}", r.field))
        .collect();

    match method.results.len() {
        0 => {
            w.comment(&format!("InjectResolve completes the call, letting {} return.", method.name));
            w.block(&format!("{receiver} InjectResolve()"), |w| {
                w.writeln(&format!("_c.respond(&{response_type}{{kind: \"resolve\"}})"));
            });
        }
        1 => {
            w.comment(&format!("InjectResult completes the call, making {} return r0.", method.name));
            w.block(&format!("{receiver} InjectResult({})", result_params.join(", ")), |w| {
                w.writeln(&format!(
                    "_c.respond(&{response_type}{{kind: \"return\"{}}})",
                    result_inits.concat()
                ));
            });
        }
        _ => {
            w.comment(&format!(
                "InjectResults completes the call, making {} return the given values.",
                method.name
            ));
            w.block(&format!("{receiver} InjectResults({})", result_params.join(", ")), |w| {
                w.writeln(&format!(
                    "_c.respond(&{response_type}{{kind: \"return\"{}}})",
                    result_inits.concat()
                ));
            });
        }
    }
    w.newline();

    w.comment(&format!("InjectPanic completes the call, making {} panic with msg.", method.name));
    w.block(&format!("{receiver} InjectPanic(msg interface{{}})"), |w| {
        w.writeln(&format!(
            "_c.respond(&{response_type}{{kind: \"panic\", panicValue: msg}})"
        ));
    });
    w.newline();
}

fn emit_forward(w: &mut GoWriter, mock: &MockData, method: &MethodData, receiver: &str) {
    let signature = format!("{}{}", method.param_types(), method.result_types());
    let (param, callee) = if mock.is_function {
        (format!("_fn func{signature}"), "_fn".to_string())
    } else {
        (
            format!("_impl interface{{ {}{signature} }}", method.name),
            format!("_impl.{}", method.name),
        )
    };
    let args: Vec<String> = method
        .params
        .iter()
        .map(|p| {
            if p.variadic {
                format!("_c.{}...", p.field)
            } else {
                format!("_c.{}", p.field)
            }
        })
        .collect();
    let invocation = format!("{callee}({})", args.join(", "));
    let results: Vec<String> = (0..method.results.len()).map(|i| format!("r{i}")).collect();

    w.comment("Forward completes the call with the outcome of running it against a real implementation.");
    w.block(&format!("{receiver} Forward({param})"), |w| match results.len() {
        0 => {
            w.writeln(&invocation);
            w.writeln("_c.InjectResolve()");
        }
        1 => {
            w.writeln(&format!("r0 := {invocation}"));
            w.writeln("_c.InjectResult(r0)");
        }
        _ => {
            w.writeln(&format!("{} := {invocation}", results.join(", ")));
            w.writeln(&format!("_c.InjectResults({})", results.join(", ")));
        }
    });
    w.newline();
}

fn emit_response_record(w: &mut GoWriter, mock: &MockData, method: &MethodData) {
    w.comment(&format!("{} is the outcome injected into a {} call.", method.response_type, method.name));
    w.block(
        &format!("type {}{} struct", method.response_type, mock.type_params_decl),
        |w| {
            if !method.results.is_empty() {
                let rows: Vec<(String, String)> =
                    method.results.iter().map(|r| (r.field.clone(), r.ty.clone())).collect();
                w.aligned(&rows);
                w.newline();
            }
            w.aligned(&[
                ("kind".to_string(), "string".to_string()),
                ("panicValue".to_string(), "interface{}".to_string()),
            ]);
        },
    );
    w.newline();
}
